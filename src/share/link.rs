//! Share link construction and fragment extraction.

use super::{SharePayload, encode_payload};
use crate::error::ShareError;

/// Longest token accepted into a share link.
///
/// Browsers and servers cap URL length in practice; links past this size
/// tend to get truncated somewhere between sender and recipient.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 20_000;

/// Builds share links of the form `<base>#<token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    base_url: String,
    max_len: usize,
}

impl ShareLink {
    /// Creates builder for the given page URL.
    ///
    /// Any fragment already present on `base_url` is dropped. The token
    /// limit starts at [`DEFAULT_MAX_TOKEN_LEN`].
    ///
    /// # Arguments
    ///
    /// * `base_url`: Page the link opens, e.g. `https://host/editor`
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if let Some(pos) = base_url.find('#') {
            base_url.truncate(pos);
        }

        Self {
            base_url,
            max_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }

    /// Sets the maximum token length.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Whether the base URL points into a private `blob:` sandbox.
    pub fn is_sandboxed(&self) -> bool {
        self.base_url
            .get(..5)
            .is_some_and(|scheme| scheme.eq_ignore_ascii_case("blob:"))
    }

    /// Encodes content and builds the share link.
    ///
    /// # Errors
    ///
    /// - [`ShareError::Sandboxed`] if the base URL is a `blob:` URL
    /// - [`ShareError::Serialization`] if the payload cannot be encoded
    /// - [`ShareError::TooLong`] if the token exceeds the size limit
    pub fn build(&self, content: &str) -> Result<String, ShareError> {
        if self.is_sandboxed() {
            return Err(ShareError::Sandboxed(self.base_url.clone()));
        }

        let token = encode_payload(&SharePayload::new(content))?;
        self.link_for(&token)
    }

    /// Builds a link around an already encoded token.
    ///
    /// Applies the size guard; an empty token means encoding failed
    /// upstream and sharing is unavailable.
    ///
    /// # Arguments
    ///
    /// * `token`: Output of [`encode`](super::encode)
    ///
    /// # Returns
    ///
    /// `<base>#<token>`
    ///
    /// # Errors
    ///
    /// Returns [`ShareError::Unavailable`] for an empty token and
    /// [`ShareError::TooLong`] if the token exceeds the size limit.
    pub fn link_for(&self, token: &str) -> Result<String, ShareError> {
        if token.is_empty() {
            return Err(ShareError::Unavailable);
        }

        if token.len() > self.max_len {
            return Err(ShareError::TooLong {
                len: token.len(),
                limit: self.max_len,
            });
        }

        Ok(format!("{}#{}", self.base_url, token))
    }
}

/// Returns the fragment part of a link.
///
/// Accepts a full link (`https://host/#token`), a bare fragment (`#token`),
/// or a bare token. Surrounding whitespace is ignored.
///
/// # Arguments
///
/// * `link`: Link, fragment or token as pasted by the user
///
/// # Returns
///
/// Text after the first `#`; the input itself when it is a bare token;
/// an empty string for a URL without a fragment
///
/// # Examples
///
/// ```
/// use markshare::share::fragment_of;
///
/// assert_eq!(fragment_of("https://example.com/#abc"), "abc");
/// assert_eq!(fragment_of("#abc"), "abc");
/// assert_eq!(fragment_of("abc"), "abc");
/// assert_eq!(fragment_of("https://example.com/"), "");
/// ```
pub fn fragment_of(link: &str) -> &str {
    let link = link.trim();
    match link.split_once('#') {
        Some((_, fragment)) => fragment,
        None if link.contains("://") || link.starts_with("blob:") => "",
        None => link,
    }
}
