//! Application state and the editor exposed to JS

use std::rc::Rc;

use js_sys::{Function, Object, Reflect, JSON};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

use vis_network::js::{manipulation_options, new_network, BrowserDialogs, DataSet};
use vis_network::manipulation::Manipulation;
use vis_network::{Network, NetworkOption};

use crate::config::EditorConfig;
use crate::graph::GraphData;

/// An editable vis-network graph bound to a container element
///
/// Nodes and edges live in `vis.DataSet`s shared with every network this
/// editor renders, so hook edits survive a re-render.
#[wasm_bindgen]
pub struct NetworkEditor {
    container: web_sys::Element,
    config: EditorConfig,
    nodes: DataSet,
    edges: DataSet,
    network: Option<Network<JsValue>>,
    /// Built on first render and reused after
    hooks: Option<Vec<NetworkOption<Function>>>,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("JSON encode error: {}", e)))?;
    JSON::parse(&json)
}

fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json = JSON::stringify(value)?
        .as_string()
        .ok_or("value has no JSON form")?;
    serde_json::from_str(&json).map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))
}

#[wasm_bindgen]
impl NetworkEditor {
    /// Create an editor for the element with id `container_id`
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config_json: Option<String>) -> Result<NetworkEditor, JsValue> {
        let document = web_sys::window()
            .ok_or("no window")?
            .document()
            .ok_or("no document")?;

        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("container '{}' not found", container_id)))?;

        let config = match config_json {
            Some(json) => EditorConfig::from_json(&json)
                .map_err(|e| JsValue::from_str(&format!("config parse error: {}", e)))?,
            None => EditorConfig::default(),
        };

        Ok(Self {
            container,
            config,
            nodes: DataSet::new(&js_sys::Array::new())?,
            edges: DataSet::new(&js_sys::Array::new())?,
            network: None,
            hooks: None,
        })
    }

    /// Load graph data from a JSON string, replacing the current graph
    pub fn load_json(&mut self, json: &str) -> Result<(), JsValue> {
        let graph = GraphData::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("JSON parse error: {}", e)))?;

        let dangling = graph.dangling_edges().count();
        if dangling > 0 {
            tracing::warn!(dangling, "graph has edges to unknown nodes");
        }

        self.nodes = DataSet::new(&to_js(&graph.nodes)?)?;
        self.edges = DataSet::new(&to_js(&graph.edges)?)?;
        Ok(())
    }

    /// Build a fresh `vis.Network` over the current data, destroying the old one
    pub fn render(&mut self) -> Result<(), JsValue> {
        if let Some(old) = self.network.take() {
            old.destroy()?;
        }

        let data = Object::new();
        Reflect::set(&data, &JsValue::from_str("nodes"), self.nodes.as_js())?;
        Reflect::set(&data, &JsValue::from_str("edges"), self.edges.as_js())?;

        let mut options = self.config.options();
        if self.config.manipulation {
            options.extend(self.hooks()?.iter().cloned());
        }

        let network = new_network(&self.container, &data, options)?;
        tracing::info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "network rendered"
        );
        self.network = Some(network);
        Ok(())
    }

    /// Reverse `from`/`to` on every selected edge; returns how many changed
    pub fn swap_selected_edges(&mut self) -> Result<usize, JsValue> {
        let network = self.network.as_ref().ok_or("network not rendered")?;
        let selected: Vec<Value> = from_js(&network.selected_edges()?.into())?;

        let mut graph = self.read_graph()?;
        let swapped = graph.swap_edges(&selected);
        for edge in &swapped {
            self.edges
                .update(&to_js(&json!({ "id": edge.id, "from": edge.from, "to": edge.to }))?)?;
        }
        tracing::debug!(swapped = swapped.len(), "swapped selected edges");
        Ok(swapped.len())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_rendered(&self) -> bool {
        self.network.is_some()
    }

    /// The current graph, including edits, as cleaned JSON
    pub fn graph_json(&self) -> Result<String, JsValue> {
        self.read_graph()?
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("JSON encode error: {}", e)))
    }

    /// The underlying `vis.Network`, if rendered
    pub fn network(&self) -> JsValue {
        self.network
            .as_ref()
            .map(|n| n.as_inner().clone())
            .unwrap_or(JsValue::UNDEFINED)
    }
}

impl NetworkEditor {
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Snapshot of the data sets
    pub fn read_graph(&self) -> Result<GraphData, JsValue> {
        let mut graph = GraphData {
            nodes: from_js(&self.nodes.items()?)?,
            edges: from_js(&self.edges.items()?)?,
        };
        graph.clean();
        Ok(graph)
    }

    fn hooks(&mut self) -> Result<&[NetworkOption<Function>], JsValue> {
        if self.hooks.is_none() {
            let dialogs = BrowserDialogs::new()?;
            let manipulation = Manipulation::new(dialogs, self.config.hooks.clone());
            self.hooks = Some(manipulation_options(Rc::new(manipulation)));
        }
        Ok(self.hooks.as_deref().unwrap_or_default())
    }
}
