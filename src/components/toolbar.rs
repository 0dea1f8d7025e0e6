//! Editor toolbar component

use maud::{Markup, html};

use crate::session::ViewMode;

const VIEW_MODES: [ViewMode; 3] = [ViewMode::Editor, ViewMode::Split, ViewMode::Preview];

/// Outcome of trying to share the displayed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareStatus<'a> {
    /// No link was requested.
    Hidden,
    /// Link ready to hand out.
    Ready(&'a str),
    /// Link could not be produced; carries the reason.
    Failed(&'a str),
}

/// Renders toolbar with title, view mode indicator and share status
///
/// # Arguments
///
/// * `title`: Document title
/// * `active`: View mode the page was generated with
/// * `share`: Share link or the reason it is missing
pub fn toolbar(title: &str, active: ViewMode, share: ShareStatus<'_>) -> Markup {
    html! {
        header class="toolbar" {
            span class="brand" { (title) }
            nav class="view-modes" {
                @for mode in VIEW_MODES {
                    @if mode == active {
                        span class="view-mode view-mode-active" { (mode.name()) }
                    } @else {
                        span class="view-mode" { (mode.name()) }
                    }
                }
            }
            div class="share" {
                @match share {
                    ShareStatus::Hidden => {}
                    ShareStatus::Ready(link) => {
                        input class="share-url" type="text" readonly value=(link);
                        a class="share-link" href=(link) { "Share" }
                    }
                    ShareStatus::Failed(reason) => {
                        span class="share-error" { (reason) }
                    }
                }
            }
        }
    }
}
