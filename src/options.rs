//! Network options, built from an ordered list of overrides.
//!
//! Each [`NetworkOption`] sets one dotted key (`edges.arrows.middle`) to either
//! a JSON value or a host callable. [`OptionsBuilder::build`] applies them in
//! order onto an empty [`OptionTree`], so a later override of the same key
//! always wins.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::error::OptionError;
use crate::manipulation::HookKind;

/// The value half of an override
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue<H> {
    Json(Value),
    Hook(H),
}

/// A single key/value override
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOption<H> {
    path: String,
    value: OptionValue<H>,
}

impl<H> NetworkOption<H> {
    pub fn set(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: OptionValue::Json(value.into()),
        }
    }

    pub fn hook(path: impl Into<String>, hook: H) -> Self {
        Self {
            path: path.into(),
            value: OptionValue::Hook(hook),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn value(&self) -> &OptionValue<H> {
        &self.value
    }

    /// Write this override into `tree`.
    pub fn apply(self, tree: &mut OptionTree<H>) -> Result<(), OptionError> {
        tree.set(&self.path, self.value)
    }
}

/// Ordered overrides waiting to be applied
#[derive(Debug, Clone)]
pub struct OptionsBuilder<H> {
    overrides: Vec<NetworkOption<H>>,
}

impl<H> Default for OptionsBuilder<H> {
    fn default() -> Self {
        Self {
            overrides: Vec::new(),
        }
    }
}

impl<H> OptionsBuilder<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, option: NetworkOption<H>) -> Self {
        self.overrides.push(option);
        self
    }

    pub fn push(&mut self, option: NetworkOption<H>) {
        self.overrides.push(option);
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Apply every override, in insertion order, to a fresh empty tree.
    ///
    /// Stops at the first override with an invalid path.
    pub fn build(self) -> Result<OptionTree<H>, OptionError> {
        let mut tree = OptionTree::new();
        for option in self.overrides {
            option.apply(&mut tree)?;
        }
        Ok(tree)
    }
}

impl<H> FromIterator<NetworkOption<H>> for OptionsBuilder<H> {
    fn from_iter<I: IntoIterator<Item = NetworkOption<H>>>(iter: I) -> Self {
        Self {
            overrides: iter.into_iter().collect(),
        }
    }
}

impl<H> Extend<NetworkOption<H>> for OptionsBuilder<H> {
    fn extend<I: IntoIterator<Item = NetworkOption<H>>>(&mut self, iter: I) {
        self.overrides.extend(iter);
    }
}

/// A node in the option tree
#[derive(Debug, Clone, PartialEq)]
pub enum OptionNode<H> {
    Json(Value),
    Hook(H),
    Object(BTreeMap<String, OptionNode<H>>),
}

impl<H> From<OptionValue<H>> for OptionNode<H> {
    fn from(value: OptionValue<H>) -> Self {
        match value {
            OptionValue::Json(v) => OptionNode::Json(v),
            OptionValue::Hook(h) => OptionNode::Hook(h),
        }
    }
}

impl<H> OptionNode<H> {
    /// Turn this node into an object node and return its children.
    ///
    /// A JSON object is split into per-field children so later writes can
    /// splice into it; any other leaf is discarded.
    fn branch_mut(&mut self) -> &mut BTreeMap<String, OptionNode<H>> {
        if !matches!(self, OptionNode::Object(_)) {
            let children = match std::mem::replace(self, OptionNode::Object(BTreeMap::new())) {
                OptionNode::Json(Value::Object(fields)) => fields
                    .into_iter()
                    .map(|(k, v)| (k, OptionNode::Json(v)))
                    .collect(),
                _ => BTreeMap::new(),
            };
            *self = OptionNode::Object(children);
        }
        match self {
            OptionNode::Object(children) => children,
            _ => unreachable!("node was converted to an object above"),
        }
    }

    /// JSON rendering of this node; hooks become `null`.
    pub fn to_json(&self) -> Value {
        match self {
            OptionNode::Json(v) => v.clone(),
            OptionNode::Hook(_) => Value::Null,
            OptionNode::Object(children) => Value::Object(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// The fully applied options, ready to hand to a runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionTree<H> {
    root: BTreeMap<String, OptionNode<H>>,
}

impl<H> Default for OptionTree<H> {
    fn default() -> Self {
        Self {
            root: BTreeMap::new(),
        }
    }
}

fn split_path(path: &str) -> Result<Vec<&str>, OptionError> {
    if path.is_empty() {
        return Err(OptionError::EmptyPath);
    }
    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(OptionError::EmptySegment(path.to_string()));
    }
    Ok(segments)
}

impl<H> OptionTree<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Number of top-level keys
    pub fn len(&self) -> usize {
        self.root.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionNode<H>)> {
        self.root.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Set `path` to `value`, replacing whatever was there.
    pub fn set(&mut self, path: &str, value: OptionValue<H>) -> Result<(), OptionError> {
        let segments = split_path(path)?;
        let Some((last, parents)) = segments.split_last() else {
            return Err(OptionError::EmptyPath);
        };

        let mut map = &mut self.root;
        for segment in parents {
            map = map
                .entry((*segment).to_string())
                .or_insert_with(|| OptionNode::Object(BTreeMap::new()))
                .branch_mut();
        }
        map.insert((*last).to_string(), value.into());
        Ok(())
    }

    /// Look up a node by dotted path, without descending into JSON leaves.
    pub fn get(&self, path: &str) -> Option<&OptionNode<H>> {
        let segments = split_path(path).ok()?;
        let (first, rest) = segments.split_first()?;
        let mut node = self.root.get(*first)?;
        for segment in rest {
            match node {
                OptionNode::Object(children) => node = children.get(*segment)?,
                _ => return None,
            }
        }
        Some(node)
    }

    /// Look up a JSON value by dotted path, descending into JSON leaves too.
    pub fn get_json(&self, path: &str) -> Option<&Value> {
        let segments = split_path(path).ok()?;
        let (first, rest) = segments.split_first()?;
        let mut node = self.root.get(*first)?;
        for (i, segment) in rest.iter().enumerate() {
            match node {
                OptionNode::Object(children) => node = children.get(*segment)?,
                OptionNode::Json(value) => {
                    return rest[i..].iter().try_fold(value, |v, s| v.get(*s));
                }
                OptionNode::Hook(_) => return None,
            }
        }
        match node {
            OptionNode::Json(value) => Some(value),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.root
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl<H> IntoIterator for OptionTree<H> {
    type Item = (String, OptionNode<H>);
    type IntoIter = std::collections::btree_map::IntoIter<String, OptionNode<H>>;

    fn into_iter(self) -> Self::IntoIter {
        self.root.into_iter()
    }
}

pub fn manipulation_enabled<H>(enabled: bool) -> NetworkOption<H> {
    NetworkOption::set("manipulation.enabled", enabled)
}

/// Whether the edit toolbar starts open
pub fn manipulation_initially_active<H>(active: bool) -> NetworkOption<H> {
    NetworkOption::set("manipulation.initiallyActive", active)
}

pub fn manipulation_hook<H>(kind: HookKind, hook: H) -> NetworkOption<H> {
    NetworkOption::hook(format!("manipulation.{}", kind.option_key()), hook)
}

pub fn multiselect<H>(enabled: bool) -> NetworkOption<H> {
    NetworkOption::set("interaction.multiselect", enabled)
}

pub fn dashed_edges<H>(dashed: bool) -> NetworkOption<H> {
    NetworkOption::set("edges.dashes", dashed)
}

/// Arrow heads drawn halfway along each edge
pub fn middle_arrows<H>(enabled: bool) -> NetworkOption<H> {
    NetworkOption::set(
        "edges.arrows.middle",
        json!({ "enabled": enabled, "type": "arrow" }),
    )
}

/// vis-network's built-in option editor panel
pub fn configurator<H>(enabled: bool) -> NetworkOption<H> {
    NetworkOption::set("configure.enabled", enabled)
}

#[cfg(test)]
mod tests {
    use super::*;

    type Opt = NetworkOption<&'static str>;

    #[test]
    fn empty_builder_yields_empty_tree() {
        let tree = OptionsBuilder::<()>::new().build().unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.to_json(), json!({}));
    }

    #[test]
    fn later_override_wins() {
        let tree: OptionTree<&str> = [
            Opt::set("physics.enabled", true),
            Opt::set("layout.randomSeed", 7),
            Opt::set("physics.enabled", false),
        ]
        .into_iter()
        .collect::<OptionsBuilder<_>>()
        .build()
        .unwrap();

        assert_eq!(tree.get_json("physics.enabled"), Some(&json!(false)));
        assert_eq!(tree.get_json("layout.randomSeed"), Some(&json!(7)));
    }

    #[test]
    fn nested_write_splices_into_json_object() {
        let tree = OptionsBuilder::new()
            .with(Opt::set("edges", json!({ "color": "red", "width": 2 })))
            .with(Opt::set("edges.width", 4))
            .build()
            .unwrap();

        assert_eq!(
            tree.to_json(),
            json!({ "edges": { "color": "red", "width": 4 } })
        );
    }

    #[test]
    fn nested_write_replaces_scalar() {
        let tree = OptionsBuilder::new()
            .with(Opt::set("edges", false))
            .with(Opt::set("edges.dashes", true))
            .build()
            .unwrap();

        assert_eq!(tree.to_json(), json!({ "edges": { "dashes": true } }));
    }

    #[test]
    fn whole_object_write_replaces_children() {
        let tree = OptionsBuilder::new()
            .with(manipulation_hook(HookKind::AddNode, "add"))
            .with(Opt::set("manipulation", json!({ "enabled": false })))
            .build()
            .unwrap();

        assert!(tree.get("manipulation.addNode").is_none());
        assert_eq!(tree.get_json("manipulation.enabled"), Some(&json!(false)));
    }

    #[test]
    fn hooks_sit_beside_json_leaves() {
        let tree = OptionsBuilder::new()
            .with(manipulation_enabled(true))
            .with(manipulation_hook(HookKind::DeleteEdge, "del"))
            .build()
            .unwrap();

        assert_eq!(
            tree.get("manipulation.deleteEdge"),
            Some(&OptionNode::Hook("del"))
        );
        assert_eq!(
            tree.to_json(),
            json!({ "manipulation": { "enabled": true, "deleteEdge": null } })
        );
    }

    #[test]
    fn invalid_paths_are_rejected() {
        let err = OptionsBuilder::new()
            .with(Opt::set("", 1))
            .build()
            .unwrap_err();
        assert_eq!(err, OptionError::EmptyPath);

        let err = OptionsBuilder::new()
            .with(Opt::set("manipulation..enabled", 1))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            OptionError::EmptySegment("manipulation..enabled".to_string())
        );
    }

    #[test]
    fn typed_setters_use_vis_keys() {
        let tree = OptionsBuilder::<()>::new()
            .with(manipulation_initially_active(true))
            .with(multiselect(true))
            .with(dashed_edges(true))
            .with(middle_arrows(true))
            .with(configurator(false))
            .build()
            .unwrap();

        assert_eq!(
            tree.to_json(),
            json!({
                "manipulation": { "initiallyActive": true },
                "interaction": { "multiselect": true },
                "edges": {
                    "dashes": true,
                    "arrows": { "middle": { "enabled": true, "type": "arrow" } }
                },
                "configure": { "enabled": false }
            })
        );
        assert_eq!(tree.len(), 4);
    }
}
