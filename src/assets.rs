//! CSS asset bundling

use anyhow::{Context, Result};
use std::{fs, path::Path};

const BASE: &str = include_str!("../assets/base.css");
const MARKDOWN: &str = include_str!("../assets/markdown.css");

/// Stylesheet file name, relative to the assets directory.
pub const STYLESHEET: &str = "markshare.css";

/// Writes bundled CSS assets to `assets_dir`, creating it if needed.
///
/// # Errors
///
/// Returns error if the directory or file cannot be written.
pub fn write_css_assets(assets_dir: &Path) -> Result<()> {
    fs::create_dir_all(assets_dir).with_context(|| {
        format!(
            "Failed to create assets directory: {}",
            assets_dir.display()
        )
    })?;
    write_bundled(assets_dir, STYLESHEET, &[BASE, MARKDOWN])
}

fn write_bundled(dir: &Path, name: &str, parts: &[&str]) -> Result<()> {
    let css = parts.join("\n");
    fs::write(dir.join(name), css)
        .with_context(|| format!("Failed to write CSS asset: {}", name))?;
    Ok(())
}
