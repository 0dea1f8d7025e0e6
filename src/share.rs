//! Editor state codec for shareable links.
//!
//! Editor content travels entirely inside the URL fragment. [`encode`] turns
//! content into a compact token that can be assigned to the fragment as is;
//! [`decode`] reads a fragment back, accepting both the current compressed
//! format and the legacy base64 format of earlier releases.
//!
//! Both directions are fail-soft: encoding failure yields an empty token,
//! and an unreadable fragment yields `None`. Neither panics.

mod format;
mod link;
pub mod lz;
mod payload;

pub use format::{
    Compressed, DEFAULT_DECODERS, DecodedShare, FragmentDecoder, Legacy, TokenFormat,
};
pub use link::{DEFAULT_MAX_TOKEN_LEN, ShareLink, fragment_of};
pub use payload::{SharePayload, now_millis};

use tracing::warn;

use crate::error::ShareError;

/// Encodes editor content into a URL fragment safe token.
///
/// The token carries the content and the current time. An empty string
/// signals that sharing is unavailable; callers must not put it in a link.
///
/// # Arguments
///
/// * `content`: Editor content, any length or script
///
/// # Returns
///
/// Token built from the URI component alphabet, or an empty string if
/// encoding failed
///
/// # Examples
///
/// ```
/// use markshare::share::{decode, encode};
///
/// let token = encode("# Notes");
/// assert_eq!(decode(&token).as_deref(), Some("# Notes"));
/// ```
pub fn encode(content: &str) -> String {
    match encode_payload(&SharePayload::new(content)) {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "failed to encode share state");
            String::new()
        }
    }
}

/// Encodes a payload, reporting why encoding failed.
///
/// # Errors
///
/// Returns [`ShareError::Serialization`] if the payload cannot be
/// serialized.
pub fn encode_payload(payload: &SharePayload) -> Result<String, ShareError> {
    let json = payload.to_json()?;
    Ok(lz::compress_to_uri_component(&json))
}

/// Decodes a URL fragment back into editor content.
///
/// A leading `#` is ignored.
///
/// # Arguments
///
/// * `fragment`: URL fragment with or without its `#`
///
/// # Returns
///
/// Editor content, or `None` for an empty fragment or one that no known
/// format can read
pub fn decode(fragment: &str) -> Option<String> {
    decode_share(fragment).map(|share| share.content)
}

/// Decodes a URL fragment, keeping timestamp and format.
pub fn decode_share(fragment: &str) -> Option<DecodedShare> {
    decode_with(fragment, &DEFAULT_DECODERS)
}

/// Decodes a URL fragment with an explicit decoder list.
///
/// Decoders run in order and the first to produce content wins.
///
/// # Arguments
///
/// * `fragment`: URL fragment with or without its `#`
/// * `decoders`: Decoding strategies in precedence order
///
/// # Returns
///
/// Share from the first decoder that read the token, or `None` if the
/// fragment is empty or every decoder gave up
pub fn decode_with(fragment: &str, decoders: &[&dyn FragmentDecoder]) -> Option<DecodedShare> {
    let token = fragment.strip_prefix('#').unwrap_or(fragment);
    if token.is_empty() {
        return None;
    }

    decoders.iter().find_map(|decoder| decoder.decode(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Decoder that accepts any token, for precedence checks.
    struct Always(&'static str, TokenFormat);

    impl FragmentDecoder for Always {
        fn format(&self) -> TokenFormat {
            self.1
        }

        fn decode(&self, _token: &str) -> Option<DecodedShare> {
            Some(DecodedShare {
                content: self.0.to_string(),
                timestamp: None,
                format: self.1,
            })
        }
    }

    #[test]
    fn test_round_trip_basic() {
        // Arrange
        let content = "# Hello\n\nThis is **bold**.";

        // Act
        let token = encode(content);

        // Assert
        assert!(!token.is_empty());
        assert_eq!(decode(&token).as_deref(), Some(content));
    }

    #[test]
    fn test_round_trip_empty_content() {
        let token = encode("");

        assert_eq!(decode(&token).as_deref(), Some(""));
    }

    #[test]
    fn test_decode_share_reports_compressed_format() {
        // Arrange
        let before = now_millis();

        // Act
        let share = decode_share(&encode("x")).expect("Should decode");

        // Assert
        assert_eq!(share.format, TokenFormat::Compressed);
        assert!(share.timestamp.is_some_and(|t| t >= before));
    }

    #[test]
    fn test_decode_empty_fragments() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("#"), None);
    }

    #[test]
    fn test_decode_strips_single_marker() {
        // Arrange
        let token = encode("marker");

        // Act & Assert
        assert_eq!(decode(&format!("#{}", token)).as_deref(), Some("marker"));
        assert_eq!(decode(&format!("##{}", token)), None);
    }

    #[test]
    fn test_decode_with_first_decoder_wins() {
        // Arrange
        let first = Always("first", TokenFormat::Compressed);
        let second = Always("second", TokenFormat::Legacy);

        // Act
        let share = decode_with("anything", &[&first, &second]).expect("Should decode");

        // Assert
        assert_eq!(share.content, "first");
        assert_eq!(share.format, TokenFormat::Compressed);
    }

    #[test]
    fn test_decode_with_falls_through_to_next_decoder() {
        // Arrange: the compressed decoder cannot read a base64 token
        let fallback = Always("fallback", TokenFormat::Legacy);

        // Act
        let share = decode_with("eyJ9/+==", &[&Compressed, &fallback]);

        // Assert
        assert_eq!(share.map(|s| s.content).as_deref(), Some("fallback"));
    }

    #[test]
    fn test_decode_with_no_decoders() {
        assert_eq!(decode_with("abc", &[]), None);
    }

    #[test]
    fn test_decode_legacy_token() {
        let share = decode_share("eyJjb250ZW50IjoiaGVsbG8ifQ==").expect("Should decode");

        assert_eq!(share.content, "hello");
        assert_eq!(share.format, TokenFormat::Legacy);
    }

    proptest! {
        #[test]
        fn prop_round_trip_any_string(content in any::<String>()) {
            let token = encode(&content);

            prop_assert_eq!(decode(&token), Some(content));
        }

        #[test]
        fn prop_token_is_fragment_safe(content in any::<String>()) {
            let token = encode(&content);

            prop_assert!(!token.is_empty());
            prop_assert!(token.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'-'));
        }

        #[test]
        fn prop_decode_never_panics(fragment in ".{0,200}") {
            let first = decode(&fragment);
            let second = decode(&fragment);

            prop_assert_eq!(first, second);
        }
    }
}
