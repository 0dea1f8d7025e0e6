//! Reusable HTML components for page generation
//!
//! Maud component functions composed by the page generators: the page
//! layout with its footer, and the editor toolbar.

pub mod footer;
pub mod layout;
pub mod toolbar;
