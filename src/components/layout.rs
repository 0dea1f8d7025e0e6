//! Page layout wrapper component

use maud::{DOCTYPE, Markup, html};

use super::footer::footer;

/// Wraps page content with standard HTML structure
///
/// Provides DOCTYPE, charset, viewport and stylesheet links; the caller
/// supplies the body. The footer carries the share time when known.
///
/// # Arguments
///
/// * `title`: Page title text (without suffix)
/// * `stylesheets`: CSS file paths to include
/// * `shared_at`: Share timestamp in epoch milliseconds, if any
/// * `body`: Page-specific body markup
pub fn page_wrapper(
    title: &str,
    stylesheets: &[&str],
    shared_at: Option<i64>,
    body: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - MarkShare" }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                (body)
                (footer(shared_at))
            }
        }
    }
}
