//! Browser tests against a stand-in `vis.Network` class.
#![cfg(target_arch = "wasm32")]

use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

use vis_network::js::{as_network, manipulation_options, new_network, BrowserDialogs};
use vis_network::manipulation::{Dialogs, HookConfig, Manipulation};
use vis_network::options::{manipulation_enabled, NetworkOption};
use vis_network::{ConstructionError, Error};

wasm_bindgen_test_configure!(run_in_browser);

fn install_fake_vis() {
    Function::new_no_args(
        r#"
        if (globalThis.vis === undefined) {
            class Network {
                constructor(container, data, options) {
                    if (container === null || container === undefined) {
                        throw new TypeError("container is required");
                    }
                    if (options.returnOther) {
                        return {};
                    }
                    this.container = container;
                    this.data = data;
                    this.options = options;
                }
            }
            globalThis.vis = { Network };
        }
        "#,
    )
    .call0(&JsValue::NULL)
    .unwrap();
}

fn get(target: &JsValue, path: &str) -> JsValue {
    path.split('.').fold(target.clone(), |v, key| {
        Reflect::get(&v, &JsValue::from_str(key)).unwrap()
    })
}

fn container() -> JsValue {
    Object::new().into()
}

struct FixedDialogs(Option<&'static str>);

impl Dialogs for FixedDialogs {
    fn prompt(&self, _message: &str, _default: &str) -> Option<String> {
        self.0.map(str::to_string)
    }

    fn confirm(&self, _message: &str) -> bool {
        self.0.is_some()
    }
}

#[wasm_bindgen_test]
fn guard_checks_instance_of() {
    install_fake_vis();
    let network = new_network(&container(), &Object::new(), []).unwrap();

    assert!(as_network(network.into_inner()).is_ok());
    assert!(as_network(Object::new().into()).is_err());
    assert!(as_network(JsValue::NULL).is_err());
}

#[wasm_bindgen_test]
fn empty_options_object_reaches_constructor() {
    install_fake_vis();
    let network = new_network(&container(), &Object::new(), []).unwrap();

    let options: Object = get(network.as_inner(), "options").unchecked_into();
    assert_eq!(Object::keys(&options).length(), 0);
}

#[wasm_bindgen_test]
fn later_override_wins() {
    install_fake_vis();
    let network = new_network(
        &container(),
        &Object::new(),
        [
            NetworkOption::set("physics.enabled", true),
            manipulation_enabled(true),
            NetworkOption::set("physics.enabled", false),
        ],
    )
    .unwrap();

    assert_eq!(get(network.as_inner(), "options.physics.enabled"), JsValue::FALSE);
    assert_eq!(get(network.as_inner(), "options.manipulation.enabled"), JsValue::TRUE);
}

#[wasm_bindgen_test]
fn constructor_throw_is_returned() {
    install_fake_vis();
    let err = new_network(&JsValue::NULL, &Object::new(), []).unwrap_err();

    assert!(matches!(err, Error::Construction(ConstructionError::Constructor(_))));
    assert!(err.cause().unwrap().is_instance_of::<js_sys::TypeError>());
}

#[wasm_bindgen_test]
fn wrong_result_is_not_network() {
    install_fake_vis();
    let err = new_network(
        &container(),
        &Object::new(),
        [NetworkOption::set("returnOther", true)],
    )
    .unwrap_err();

    assert!(err.is_not_network());
}

/// Call the `key` hook the way vis-network would and return what the
/// callback received.
fn run_hook<G: Dialogs + 'static>(dialogs: G, key: &str, data: &JsValue) -> JsValue {
    install_fake_vis();
    let manipulation = Rc::new(Manipulation::new(dialogs, HookConfig::default()));
    let network = new_network(&container(), &Object::new(), manipulation_options(manipulation)).unwrap();

    let hook: Function = get(network.as_inner(), &format!("options.manipulation.{}", key)).unchecked_into();
    let seen = js_sys::Array::new();
    let callback = Function::new_with_args("d", "this.push(d);").bind(&seen);
    hook.call2(&JsValue::NULL, data, &callback).unwrap();

    assert_eq!(seen.length(), 1);
    seen.get(0)
}

fn run_add_node(answer: Option<&'static str>) -> (JsValue, JsValue) {
    let data: JsValue = Object::new().into();
    let committed = run_hook(FixedDialogs(answer), "addNode", &data);
    (data, committed)
}

/// Replace `window[name]` with a function built from `body`.
fn stub_window(name: &str, body: &str) {
    let stub = Function::new_with_args("message, value", body);
    Reflect::set(&js_sys::global(), &JsValue::from_str(name), &stub).unwrap();
}

fn item(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

#[wasm_bindgen_test]
fn add_node_hook_commits_label() {
    let (data, committed) = run_add_node(Some("X"));

    assert_eq!(get(&data, "label").as_string().as_deref(), Some("X"));
    assert_eq!(committed, data);
}

#[wasm_bindgen_test]
fn add_node_hook_cancels_with_null() {
    let (data, committed) = run_add_node(None);

    assert!(get(&data, "label").is_undefined());
    assert!(committed.is_null());
}

#[wasm_bindgen_test]
fn delete_hook_follows_window_confirm() {
    let data = item(r#"{"nodes": [1], "edges": []}"#);

    stub_window("confirm", "return true;");
    let committed = run_hook(BrowserDialogs::new().unwrap(), "deleteNode", &data);
    assert_eq!(committed, data);

    stub_window("confirm", "return false;");
    let committed = run_hook(BrowserDialogs::new().unwrap(), "deleteEdge", &data);
    assert!(committed.is_null());
}

#[wasm_bindgen_test]
fn throwing_confirm_cancels_delete() {
    stub_window("confirm", "throw new Error('blocked');");
    let committed = run_hook(BrowserDialogs::new().unwrap(), "deleteNode", &item("{}"));

    assert!(committed.is_null());
}

#[wasm_bindgen_test]
fn edit_prompt_is_seeded_with_current_label() {
    stub_window("prompt", "globalThis.promptDefault = value; return 'new';");
    let data = item(r#"{"id": 7, "label": "old"}"#);

    let committed = run_hook(BrowserDialogs::new().unwrap(), "editNode", &data);

    assert_eq!(
        get(&js_sys::global(), "promptDefault").as_string().as_deref(),
        Some("old")
    );
    assert_eq!(committed, data);
    assert_eq!(get(&data, "label").as_string().as_deref(), Some("new"));
}
