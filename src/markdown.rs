//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! The preview pane's renderer: comrak with GFM extensions (tables,
//! strikethrough, autolinks, task lists, footnotes) and syntect highlighting
//! for fenced code.

mod renderer;

pub use renderer::MarkdownRenderer;
