//! Self-contained host page for the network editor
//!
//! Produces a single HTML file that loads the vis-network standalone bundle,
//! inlines the wasm-bindgen JS glue and the base64-encoded WASM binary, and
//! starts the editor on an optional embedded graph.

use base64::Engine;
use serde_json::Value;

/// Standalone UMD build, which defines the `vis` global
pub const DEFAULT_VIS_SRC: &str = "https://unpkg.com/vis-network/standalone/umd/vis-network.min.js";

/// Everything the page embeds
#[derive(Debug, Clone)]
pub struct PageAssets {
    pub title: String,
    /// wasm-bindgen `--target web` output (`<name>.js`)
    pub js_glue: String,
    /// `<name>_bg.wasm`
    pub wasm: Vec<u8>,
    pub vis_src: String,
    pub graph: Option<Value>,
    pub config: Option<Value>,
}

impl PageAssets {
    pub fn new(js_glue: String, wasm: Vec<u8>) -> Self {
        Self {
            title: "Network Editor".to_string(),
            js_glue,
            wasm,
            vis_src: DEFAULT_VIS_SRC.to_string(),
            graph: None,
            config: None,
        }
    }
}

pub fn render_page(assets: &PageAssets) -> String {
    let wasm_base64 = base64::engine::general_purpose::STANDARD.encode(&assets.wasm);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
    <script src="{vis_src}"></script>
</head>
<body>
    <header class="header">
        <h1>{title}</h1>
        <button id="swap-edges" type="button">Swap selected edges</button>
        <span class="counts" id="counts"></span>
    </header>

    <main id="network"></main>

    <script type="module">
{wasm_js_modified}

const GRAPH_DATA = {graph_json};
const EDITOR_CONFIG = {config_json};

const wasmBase64 = "{wasm_base64}";
const wasmBytes = Uint8Array.from(atob(wasmBase64), c => c.charCodeAt(0));

async function main() {{
    await __wbg_init(wasmBytes.buffer);

    const editor = create_editor(
        'network',
        EDITOR_CONFIG === null ? undefined : JSON.stringify(EDITOR_CONFIG),
    );
    if (GRAPH_DATA !== null) {{
        editor.load_json(JSON.stringify(GRAPH_DATA));
    }}
    editor.render();

    const showCounts = () => {{
        document.getElementById('counts').textContent =
            `${{editor.node_count()}} nodes, ${{editor.edge_count()}} edges`;
    }};
    showCounts();

    document.getElementById('swap-edges').addEventListener('click', () => {{
        editor.swap_selected_edges();
        showCounts();
    }});
}}

main().catch(e => {{
    console.error(e);
    document.getElementById('counts').textContent = String(e);
}});
    </script>
</body>
</html>"##,
        title = escape_html(&assets.title),
        css = EMBEDDED_CSS,
        vis_src = escape_html(&assets.vis_src),
        wasm_js_modified = modify_wasm_js(&assets.js_glue),
        graph_json = script_json(assets.graph.as_ref()),
        config_json = script_json(assets.config.as_ref()),
        wasm_base64 = wasm_base64,
    )
}

/// Modify the wasm-bindgen generated JS to work with inline WASM loading
fn modify_wasm_js(js: &str) -> String {
    // Keep __wbg_init in scope as a plain function instead of a default export
    js.replace("export default __wbg_init;", "// init exposed as __wbg_init")
        .replace("export { initSync }", "// initSync removed for embedding")
}

/// JSON literal safe to place inside a `<script>` element
fn script_json(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string().replace("</", "<\\/"),
        None => "null".to_string(),
    }
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const EMBEDDED_CSS: &str = r##":root {
    --bg: #1a1a2e;
    --bg-panel: #16213e;
    --text: #eee;
    --text-dim: #888;
    --accent: #8be9fd;
    --border: #333;
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: var(--bg);
    color: var(--text);
    height: 100vh;
    display: flex;
    flex-direction: column;
    overflow: hidden;
}

.header {
    background: var(--bg-panel);
    padding: 0.75rem 1rem;
    display: flex;
    align-items: center;
    gap: 1rem;
    border-bottom: 1px solid var(--border);
}

.header h1 {
    font-size: 1.1rem;
    color: var(--accent);
    font-weight: 600;
}

.counts { color: var(--text-dim); font-size: 0.85rem; }

#network {
    flex: 1;
    background: #fff;
}
"##;
