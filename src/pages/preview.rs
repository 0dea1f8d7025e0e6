//! Preview page generation for a markdown session

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};

use crate::assets::STYLESHEET;
use crate::components::layout::page_wrapper;
use crate::components::toolbar::{ShareStatus, toolbar};
use crate::markdown::MarkdownRenderer;
use crate::session::Session;

/// Data container for preview page generation.
pub struct PreviewPageData<'a> {
    pub title: &'a str,
    pub session: &'a Session,
    pub share: ShareStatus<'a>,
}

/// Generates the preview page for a session
///
/// Lays out the editor pane (read-only source) and the rendered preview
/// pane according to the session's view mode. An empty document shows a
/// placeholder instead of rendered output.
///
/// # Errors
///
/// Returns error if markdown rendering fails
///
/// # Examples
///
/// ```
/// use markshare::pages::preview::{PreviewPageData, generate};
/// use markshare::{MarkdownRenderer, Session, ShareStatus, ViewMode};
///
/// let session = Session::new("# Notes", ViewMode::Split);
/// let page = generate(
///     PreviewPageData {
///         title: "Notes",
///         session: &session,
///         share: ShareStatus::Hidden,
///     },
///     &MarkdownRenderer::new(),
/// )?;
/// assert!(page.into_string().contains("<h1>Notes</h1>"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn generate(data: PreviewPageData<'_>, renderer: &MarkdownRenderer) -> Result<Markup> {
    let markdown = data.session.markdown();
    let view_mode = data.session.view_mode();

    let rendered = if view_mode.shows_preview() && !markdown.is_empty() {
        Some(
            renderer
                .render(markdown)
                .context("Failed to render markdown preview")?,
        )
    } else {
        None
    };

    let stylesheet = format!("assets/{}", STYLESHEET);

    let body = html! {
        (toolbar(data.title, view_mode, data.share))
        main class={ "panes view-" (view_mode.name()) } {
            @if view_mode.shows_editor() {
                section class="pane pane-editor" {
                    textarea readonly spellcheck="false" placeholder="Type your markdown here..." {
                        (markdown)
                    }
                }
            }
            @if view_mode.shows_preview() {
                section class="pane pane-preview" {
                    @if let Some(html) = &rendered {
                        article class="markdown-body" { (PreEscaped(html)) }
                    } @else {
                        div class="empty-preview" {
                            p { "Start typing to see the preview" }
                        }
                    }
                }
            }
        }
    };

    Ok(page_wrapper(
        data.title,
        &[stylesheet.as_str()],
        data.session.shared_at(),
        body,
    ))
}
