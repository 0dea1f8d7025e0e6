//! Markdown sharing through URL fragments.
//!
//! Editor content is packed into a compact token that lives entirely in the
//! fragment of a link, so nothing is stored server side. See [`share`] for
//! the codec; the rest of the crate renders shared documents to static
//! preview pages.

mod assets;
pub mod components;
mod config;
mod error;
mod markdown;
pub mod pages;
mod session;
pub mod share;
mod util;

pub use assets::{STYLESHEET, write_css_assets};
pub use components::toolbar::ShareStatus;
pub use config::{
    Command, Config, DEFAULT_BASE_URL, LinkArgs, OpenArgs, PreviewArgs, ShareArgs, is_stdin,
};
pub use error::ShareError;
pub use markdown::MarkdownRenderer;
pub use session::{Session, ViewMode, WELCOME_MARKDOWN};
pub use share::{
    DecodedShare, ShareLink, SharePayload, TokenFormat, decode, decode_share, encode, fragment_of,
};
pub use util::{format_age, format_size};
