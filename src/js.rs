//! Browser runtime backed by the global `vis` library.
//!
//! `vis.Network` and its prototype are looked up once and kept in a
//! thread-local; wasm32 in the browser runs on a single thread.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use js_sys::{Array, Function, Object, Reflect, JSON};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{ConstructionError, Error, NotNetworkError};
use crate::manipulation::{Dialogs, EditCallback, HookKind, ItemData, Manipulation};
use crate::network::{construct, guard, Network, NetworkRuntime};
use crate::options::{manipulation_enabled, manipulation_hook, NetworkOption, OptionNode, OptionTree};

thread_local! {
    static VIS_NETWORK: OnceCell<VisRuntime> = const { OnceCell::new() };
}

/// The `vis.Network` constructor as found on the global object
#[derive(Debug, Clone)]
pub struct VisRuntime {
    constructor: Function,
    prototype: Object,
}

impl VisRuntime {
    /// Return the cached runtime, resolving `globalThis.vis.Network` on first use.
    ///
    /// A failed lookup is not cached, so a page that loads vis-network late can
    /// call this again.
    pub fn resolve() -> Result<Self, JsValue> {
        VIS_NETWORK.with(|cell| {
            if let Some(runtime) = cell.get() {
                return Ok(runtime.clone());
            }
            let runtime = Self::lookup()?;
            let _ = cell.set(runtime.clone());
            Ok(runtime)
        })
    }

    fn lookup() -> Result<Self, JsValue> {
        let constructor = vis_constructor("Network")?;
        let prototype = Reflect::get(&constructor, &JsValue::from_str("prototype"))?
            .dyn_into::<Object>()
            .map_err(|_| JsValue::from_str("vis.Network has no prototype"))?;

        tracing::debug!("resolved vis.Network");
        Ok(Self {
            constructor,
            prototype,
        })
    }

    pub fn constructor(&self) -> &Function {
        &self.constructor
    }
}

/// `globalThis.vis[name]` as a constructor
fn vis_constructor(name: &str) -> Result<Function, JsValue> {
    let vis = Reflect::get(&js_sys::global(), &JsValue::from_str("vis"))?;
    if vis.is_undefined() || vis.is_null() {
        return Err(JsValue::from_str("global `vis` is not loaded"));
    }
    Reflect::get(&vis, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("vis.{} is not a constructor", name)))
}

/// `target[name](...args)`
fn call_method(target: &JsValue, name: &str, args: &Array) -> Result<JsValue, JsValue> {
    let method = Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("`{}` is not a method", name)))?;
    Reflect::apply(&method, target, args)
}

fn node_to_js(node: OptionNode<Function>) -> Result<JsValue, JsValue> {
    match node {
        OptionNode::Json(value) => JSON::parse(&value.to_string()),
        OptionNode::Hook(hook) => Ok(hook.into()),
        OptionNode::Object(children) => {
            let object = Object::new();
            for (key, child) in children {
                Reflect::set(&object, &JsValue::from_str(&key), &node_to_js(child)?)?;
            }
            Ok(object.into())
        }
    }
}

impl NetworkRuntime for VisRuntime {
    type Value = JsValue;
    type Hook = Function;
    type Fault = JsValue;

    fn is_network(&self, value: &JsValue) -> bool {
        self.prototype.is_prototype_of(value)
    }

    fn materialize(&self, options: OptionTree<Function>) -> Result<JsValue, JsValue> {
        let object = Object::new();
        for (key, node) in options {
            Reflect::set(&object, &JsValue::from_str(&key), &node_to_js(node)?)?;
        }
        Ok(object.into())
    }

    fn instantiate(&self, container: &JsValue, data: &JsValue, options: JsValue) -> Result<JsValue, JsValue> {
        Reflect::construct(&self.constructor, &Array::of3(container, data, &options))
    }
}

impl Network<JsValue> {
    /// Ids of the currently selected edges
    pub fn selected_edges(&self) -> Result<Array, JsValue> {
        Ok(call_method(self.as_inner(), "getSelectedEdges", &Array::new())?.unchecked_into())
    }

    /// Remove the network from the DOM and drop its listeners.
    pub fn destroy(&self) -> Result<(), JsValue> {
        call_method(self.as_inner(), "destroy", &Array::new()).map(|_| ())
    }
}

/// A live `vis.DataSet` of nodes or edges
///
/// Edits made through the manipulation hooks land here, so reading it back
/// always reflects what the user sees.
#[derive(Debug, Clone)]
pub struct DataSet(JsValue);

impl DataSet {
    /// `new vis.DataSet(items)`
    pub fn new(items: &JsValue) -> Result<Self, JsValue> {
        let constructor = vis_constructor("DataSet")?;
        Reflect::construct(&constructor, &Array::of1(items)).map(Self)
    }

    pub fn len(&self) -> usize {
        Reflect::get(&self.0, &JsValue::from_str("length"))
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(0, |n| n as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every item, as an array
    pub fn items(&self) -> Result<JsValue, JsValue> {
        call_method(&self.0, "get", &Array::new())
    }

    /// Merge `item` into the stored item with the same id.
    pub fn update(&self, item: &JsValue) -> Result<(), JsValue> {
        call_method(&self.0, "update", &Array::of1(item)).map(|_| ())
    }

    pub fn as_js(&self) -> &JsValue {
        &self.0
    }
}

/// Check that `value` is a `vis.Network`.
///
/// Fails when vis-network is not loaded at all, since nothing can be an
/// instance of it then.
pub fn as_network(value: JsValue) -> Result<Network<JsValue>, NotNetworkError> {
    let runtime = VisRuntime::resolve().map_err(|_| NotNetworkError)?;
    guard(&runtime, value)
}

/// `new vis.Network(container, data, options)` with faults returned as errors.
pub fn new_network<I>(container: &JsValue, data: &JsValue, options: I) -> Result<Network<JsValue>, Error<JsValue>>
where
    I: IntoIterator<Item = NetworkOption<Function>>,
{
    let runtime = VisRuntime::resolve().map_err(ConstructionError::Unavailable)?;
    construct(&runtime, container, data, options)
}

impl From<NotNetworkError> for JsValue {
    fn from(err: NotNetworkError) -> Self {
        js_sys::TypeError::new(&err.to_string()).into()
    }
}

impl From<Error<JsValue>> for JsValue {
    fn from(err: Error<JsValue>) -> Self {
        let js_err = js_sys::Error::new(&err.to_string());
        if let Some(cause) = err.cause() {
            let _ = Reflect::set(&js_err, &JsValue::from_str("cause"), cause);
        }
        js_err.into()
    }
}

/// `window.prompt` and `window.confirm`
#[derive(Debug, Clone)]
pub struct BrowserDialogs {
    window: web_sys::Window,
}

impl BrowserDialogs {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        Ok(Self { window })
    }
}

/// Treat a dialog that threw as dismissed.
fn or_dismissed<T, E: fmt::Debug>(answer: Result<T, E>, dismissed: T, dialog: &str) -> T {
    answer.unwrap_or_else(|e| {
        tracing::warn!(dialog, ?e, "dialog threw, treating as dismissed");
        dismissed
    })
}

impl Dialogs for BrowserDialogs {
    fn prompt(&self, message: &str, default: &str) -> Option<String> {
        or_dismissed(
            self.window.prompt_with_message_and_default(message, default),
            None,
            "prompt",
        )
    }

    fn confirm(&self, message: &str) -> bool {
        or_dismissed(self.window.confirm_with_message(message), false, "confirm")
    }
}

/// The node or edge object vis-network passes to a hook
#[derive(Debug, Clone)]
pub struct JsItem(JsValue);

impl JsItem {
    pub fn new(value: JsValue) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> JsValue {
        self.0
    }

    fn get_string(&self, key: &str) -> Option<String> {
        Reflect::get(&self.0, &JsValue::from_str(key))
            .ok()
            .and_then(|v| v.as_string())
    }

    fn set_string(&mut self, key: &str, value: &str) {
        if let Err(e) = Reflect::set(&self.0, &JsValue::from_str(key), &JsValue::from_str(value)) {
            tracing::warn!(key, ?e, "could not update item");
        }
    }
}

impl ItemData for JsItem {
    fn label(&self) -> Option<String> {
        self.get_string("label")
    }

    fn set_label(&mut self, label: &str) {
        self.set_string("label", label);
    }

    fn group(&self) -> Option<String> {
        self.get_string("group")
    }

    fn set_group(&mut self, group: &str) {
        self.set_string("group", group);
    }
}

/// vis-network's hook callback: `callback(data)` commits, `callback(null)` cancels.
#[derive(Debug, Clone)]
pub struct JsEditCallback(Function);

impl JsEditCallback {
    pub fn new(callback: Function) -> Self {
        Self(callback)
    }
}

impl EditCallback<JsItem> for JsEditCallback {
    fn commit(&self, kind: HookKind, data: JsItem) {
        if let Err(e) = self.0.call1(&JsValue::NULL, &data.0) {
            tracing::warn!(hook = kind.option_key(), ?e, "commit callback threw");
        }
    }

    fn cancel(&self) {
        if let Err(e) = self.0.call1(&JsValue::NULL, &JsValue::NULL) {
            tracing::warn!(?e, "cancel callback threw");
        }
    }
}

/// Options enabling manipulation with all six hooks routed through `manipulation`.
///
/// The hook closures are handed to JS and never freed; they live as long as
/// the page.
pub fn manipulation_options<G>(manipulation: Rc<Manipulation<G>>) -> Vec<NetworkOption<Function>>
where
    G: Dialogs + 'static,
{
    let mut options = vec![manipulation_enabled(true)];
    for kind in HookKind::ALL {
        let manipulation = Rc::clone(&manipulation);
        let hook = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |data: JsValue, callback: JsValue| {
            let Ok(callback) = callback.dyn_into::<Function>() else {
                tracing::warn!(hook = kind.option_key(), "hook called without a callback");
                return;
            };
            manipulation.run(kind, JsItem(data), &JsEditCallback(callback));
        });
        options.push(manipulation_hook(kind, hook.into_js_value().unchecked_into()));
    }
    options
}
