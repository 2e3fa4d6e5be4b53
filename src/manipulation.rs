//! Interactive node and edge editing hooks.
//!
//! vis-network calls one of six `manipulation` hooks with the item being
//! edited and a callback. Every hook goes `Prompted -> Confirmed | Cancelled`:
//! add/edit hooks ask for a label, delete hooks ask for confirmation. A
//! dismissed dialog cancels without touching the item.

use serde::{Deserialize, Serialize};

/// One of the six `manipulation` hook slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    AddNode,
    EditNode,
    DeleteNode,
    AddEdge,
    EditEdge,
    DeleteEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Node,
    Edge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Edit,
    Delete,
}

impl HookKind {
    pub const ALL: [HookKind; 6] = [
        HookKind::AddNode,
        HookKind::EditNode,
        HookKind::DeleteNode,
        HookKind::AddEdge,
        HookKind::EditEdge,
        HookKind::DeleteEdge,
    ];

    /// Key of this hook inside the `manipulation` options object
    pub fn option_key(self) -> &'static str {
        match self {
            HookKind::AddNode => "addNode",
            HookKind::EditNode => "editNode",
            HookKind::DeleteNode => "deleteNode",
            HookKind::AddEdge => "addEdge",
            HookKind::EditEdge => "editEdge",
            HookKind::DeleteEdge => "deleteEdge",
        }
    }

    pub fn target(self) -> Target {
        match self {
            HookKind::AddNode | HookKind::EditNode | HookKind::DeleteNode => Target::Node,
            HookKind::AddEdge | HookKind::EditEdge | HookKind::DeleteEdge => Target::Edge,
        }
    }

    pub fn action(self) -> Action {
        match self {
            HookKind::AddNode | HookKind::AddEdge => Action::Add,
            HookKind::EditNode | HookKind::EditEdge => Action::Edit,
            HookKind::DeleteNode | HookKind::DeleteEdge => Action::Delete,
        }
    }
}

/// How a hook invocation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    Confirmed,
    Cancelled,
}

/// Modal dialogs shown to the user
pub trait Dialogs {
    /// Text prompt seeded with `default`. `None` when dismissed.
    fn prompt(&self, message: &str, default: &str) -> Option<String>;

    fn confirm(&self, message: &str) -> bool;
}

/// The node or edge object handed to a hook
pub trait ItemData {
    fn label(&self) -> Option<String>;
    fn set_label(&mut self, label: &str);
    fn group(&self) -> Option<String>;
    fn set_group(&mut self, group: &str);
}

/// The callback vis-network passes alongside the item
pub trait EditCallback<D> {
    fn commit(&self, kind: HookKind, data: D);
    fn cancel(&self);
}

/// Dialog texts and editing behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub add_node_prompt: String,
    pub edit_node_prompt: String,
    pub delete_node_prompt: String,
    pub add_edge_prompt: String,
    pub edit_edge_prompt: String,
    pub delete_edge_prompt: String,
    pub node_group_prompt: String,
    /// Ask for a node group after the label
    pub ask_node_group: bool,
    /// Trim whitespace from labels and groups before committing
    pub trim_labels: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            add_node_prompt: "Enter node label:".to_string(),
            edit_node_prompt: "Edit node label:".to_string(),
            delete_node_prompt: "Delete node?".to_string(),
            add_edge_prompt: "Enter edge label:".to_string(),
            edit_edge_prompt: "Edit edge label:".to_string(),
            delete_edge_prompt: "Delete edge?".to_string(),
            node_group_prompt: "Enter node group:".to_string(),
            ask_node_group: false,
            trim_labels: true,
        }
    }
}

impl HookConfig {
    pub fn message(&self, kind: HookKind) -> &str {
        match kind {
            HookKind::AddNode => &self.add_node_prompt,
            HookKind::EditNode => &self.edit_node_prompt,
            HookKind::DeleteNode => &self.delete_node_prompt,
            HookKind::AddEdge => &self.add_edge_prompt,
            HookKind::EditEdge => &self.edit_edge_prompt,
            HookKind::DeleteEdge => &self.delete_edge_prompt,
        }
    }
}

/// Runs manipulation hooks against a set of dialogs
#[derive(Debug, Clone)]
pub struct Manipulation<G> {
    dialogs: G,
    config: HookConfig,
}

impl<G: Dialogs> Manipulation<G> {
    pub fn new(dialogs: G, config: HookConfig) -> Self {
        Self { dialogs, config }
    }

    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    pub fn run<D, C>(&self, kind: HookKind, data: D, callback: &C) -> HookOutcome
    where
        D: ItemData,
        C: EditCallback<D>,
    {
        let outcome = match kind.action() {
            Action::Delete => self.run_delete(kind, data, callback),
            Action::Add | Action::Edit => self.run_edit(kind, data, callback),
        };
        tracing::debug!(hook = kind.option_key(), ?outcome, "manipulation hook finished");
        outcome
    }

    fn run_delete<D, C>(&self, kind: HookKind, data: D, callback: &C) -> HookOutcome
    where
        C: EditCallback<D>,
    {
        if self.dialogs.confirm(self.config.message(kind)) {
            callback.commit(kind, data);
            HookOutcome::Confirmed
        } else {
            callback.cancel();
            HookOutcome::Cancelled
        }
    }

    fn run_edit<D, C>(&self, kind: HookKind, mut data: D, callback: &C) -> HookOutcome
    where
        D: ItemData,
        C: EditCallback<D>,
    {
        let seed = match kind.action() {
            Action::Edit => data.label().unwrap_or_default(),
            _ => String::new(),
        };
        let Some(label) = self.dialogs.prompt(self.config.message(kind), &seed) else {
            callback.cancel();
            return HookOutcome::Cancelled;
        };
        data.set_label(self.clean(&label));

        if kind.target() == Target::Node && self.config.ask_node_group {
            let seed = data.group().unwrap_or_default();
            // A dismissed group prompt keeps the current group
            if let Some(group) = self.dialogs.prompt(&self.config.node_group_prompt, &seed) {
                data.set_group(self.clean(&group));
            }
        }

        callback.commit(kind, data);
        HookOutcome::Confirmed
    }

    fn clean<'a>(&self, text: &'a str) -> &'a str {
        if self.config.trim_labels {
            text.trim()
        } else {
            text
        }
    }
}
