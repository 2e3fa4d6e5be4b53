//! Graph data model for the network editor
//!
//! Nodes and edges are loaded from JSON into vis `DataSet`s, and read back
//! from them once the user has edited the graph.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Nodes and edges of one graph
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
    #[serde(default)]
    pub edges: Vec<EdgeData>,
}

/// A node; vis-network ids may be strings or numbers
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeData {
    pub id: Value,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EdgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub from: Value,
    pub to: Value,
    #[serde(default)]
    pub label: String,
}

impl NodeData {
    /// Trim label and group; an empty group is dropped
    pub fn clean(&mut self) {
        self.label = self.label.trim().to_string();
        self.group = self
            .group
            .take()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
    }
}

impl EdgeData {
    pub fn clean(&mut self) {
        self.label = self.label.trim().to_string();
    }

    /// Reverse the edge direction
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
    }
}

impl GraphData {
    /// Parse and clean a graph
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut graph: GraphData = serde_json::from_str(json)?;
        graph.clean();
        Ok(graph)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn clean(&mut self) {
        self.nodes.iter_mut().for_each(NodeData::clean);
        self.edges.iter_mut().for_each(EdgeData::clean);
    }

    /// Reverse every edge whose id is in `ids`; returns the updated edges.
    ///
    /// Unknown ids and edges without an id are skipped.
    pub fn swap_edges(&mut self, ids: &[Value]) -> Vec<EdgeData> {
        let mut swapped = Vec::new();
        for edge in &mut self.edges {
            if edge.id.as_ref().is_some_and(|id| ids.contains(id)) {
                edge.swap();
                swapped.push(edge.clone());
            }
        }
        swapped
    }

    /// Edges whose endpoints are not among the nodes
    pub fn dangling_edges(&self) -> impl Iterator<Item = &EdgeData> {
        self.edges.iter().filter(move |e| {
            !self.nodes.iter().any(|n| n.id == e.from) || !self.nodes.iter().any(|n| n.id == e.to)
        })
    }
}
