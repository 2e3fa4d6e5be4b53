//! WASM-based vis-network graph editor
//!
//! Renders a graph with vis-network and lets the user add, edit and delete
//! nodes and edges through browser prompts.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod config;
pub mod graph;

pub use app::NetworkEditor;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

/// Create a new editor instance
///
/// # Arguments
/// * `container_id` - The ID of the element vis-network renders into
/// * `config_json` - Optional editor settings as JSON
///
/// # Returns
/// A new NetworkEditor instance, or throws an error if initialization fails
#[wasm_bindgen]
pub fn create_editor(container_id: &str, config_json: Option<String>) -> Result<NetworkEditor, JsValue> {
    NetworkEditor::new(container_id, config_json)
}
