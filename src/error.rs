//! Error types for link sharing.

use thiserror::Error;

/// Reasons a share link could not be produced.
///
/// Decoding never fails with an error; an unreadable fragment is simply
/// "no content". Only link creation reports why it gave up.
#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sharing is unavailable: the encoded token is empty")]
    Unavailable,

    #[error("Content is too long to generate a shareable link ({len} > {limit} characters)")]
    TooLong { len: usize, limit: usize },

    #[error("Links generated from a private sandbox cannot be shared: {0}")]
    Sandboxed(String),
}
