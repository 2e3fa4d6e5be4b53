//! Emit a self-contained HTML page hosting the network editor.
//!
//! Usage: vis-network-page <pkg-dir> [--name NAME] [--graph FILE] [--config FILE]
//!                         [--title TITLE] [--vis-src URL] [--out FILE]
//!
//! `<pkg-dir>` is the wasm-bindgen `--target web` output for `network-editor`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;

use vis_network::page::{render_page, PageAssets};

const USAGE: &str = "usage: vis-network-page <pkg-dir> [--name NAME] [--graph FILE] [--config FILE] [--title TITLE] [--vis-src URL] [--out FILE]";

#[derive(Debug, Default)]
struct Args {
    pkg_dir: PathBuf,
    name: Option<String>,
    graph: Option<PathBuf>,
    config: Option<PathBuf>,
    title: Option<String>,
    vis_src: Option<String>,
    out: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args::default();
    let mut pkg_dir = None;
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--name" => parsed.name = Some(value("--name")?),
            "--graph" => parsed.graph = Some(value("--graph")?.into()),
            "--config" => parsed.config = Some(value("--config")?.into()),
            "--title" => parsed.title = Some(value("--title")?),
            "--vis-src" => parsed.vis_src = Some(value("--vis-src")?),
            "--out" | "-o" => parsed.out = Some(value("--out")?.into()),
            "--help" | "-h" => bail!(USAGE),
            flag if flag.starts_with('-') => bail!("unknown flag {flag}\n{USAGE}"),
            _ if pkg_dir.is_none() => pkg_dir = Some(PathBuf::from(&arg)),
            _ => bail!("unexpected argument {arg}\n{USAGE}"),
        }
    }
    parsed.pkg_dir = pkg_dir.context(USAGE)?;
    Ok(parsed)
}

fn read_json(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let name = args.name.as_deref().unwrap_or("network_editor");

    let js_path = args.pkg_dir.join(format!("{name}.js"));
    let wasm_path = args.pkg_dir.join(format!("{name}_bg.wasm"));
    let js_glue = fs::read_to_string(&js_path)
        .with_context(|| format!("Failed to read {} (build with wasm-pack --target web first)", js_path.display()))?;
    let wasm = fs::read(&wasm_path).with_context(|| format!("Failed to read {}", wasm_path.display()))?;

    let mut assets = PageAssets::new(js_glue, wasm);
    if let Some(title) = args.title {
        assets.title = title;
    }
    if let Some(vis_src) = args.vis_src {
        assets.vis_src = vis_src;
    }
    assets.graph = args.graph.as_deref().map(read_json).transpose()?;
    assets.config = args.config.as_deref().map(read_json).transpose()?;

    let html = render_page(&assets);
    match args.out {
        None => write!(io::stdout(), "{}", html).context("Failed to write HTML")?,
        Some(out_path) => {
            let mut b = BufWriter::new(
                File::create(&out_path).with_context(|| format!("Failed to create {}", out_path.display()))?,
            );
            write!(b, "{}", html).with_context(|| format!("Failed to write {}", out_path.display()))?;
            b.flush()?;
            eprintln!("Wrote {}", out_path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_flags_and_pkg_dir() {
        let parsed = args(&["pkg", "--title", "Journal", "-o", "out.html"]).unwrap();
        assert_eq!(parsed.pkg_dir, PathBuf::from("pkg"));
        assert_eq!(parsed.title.as_deref(), Some("Journal"));
        assert_eq!(parsed.out, Some(PathBuf::from("out.html")));
    }

    #[test]
    fn rejects_missing_pkg_dir_and_unknown_flags() {
        assert!(args(&[]).is_err());
        assert!(args(&["pkg", "--frobnicate"]).is_err());
        assert!(args(&["pkg", "--graph"]).is_err());
    }
}
