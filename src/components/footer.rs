//! Page footer component

use maud::{Markup, html};

use crate::util::format_age;

/// Renders footer, noting when shared content was shared.
pub fn footer(shared_at: Option<i64>) -> Markup {
    html! {
        footer class="footer" {
            @if let Some(millis) = shared_at {
                span class="shared-at" { "Shared " (format_age(millis)) }
                " · "
            }
            span { "Generated by MarkShare" }
        }
    }
}
