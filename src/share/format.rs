//! Fragment decoders, one per wire format.
//!
//! A fragment is tried against each decoder in order and the first one that
//! yields content wins. New links always use the compressed format; the
//! legacy decoder keeps links captured before the switch readable.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::Value;
use std::fmt;
use tracing::debug;

use super::lz;

/// Base64 as browsers' `atob` reads it: padding optional, stray trailing
/// bits ignored.
const LEGACY_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Wire format a token was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenFormat {
    /// LZ compressed JSON in the URI component alphabet.
    Compressed,
    /// Uncompressed base64 JSON from earlier releases.
    Legacy,
}

impl TokenFormat {
    pub fn name(&self) -> &'static str {
        match self {
            TokenFormat::Compressed => "compressed",
            TokenFormat::Legacy => "legacy",
        }
    }
}

impl fmt::Display for TokenFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Content recovered from a share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShare {
    pub content: String,
    /// Milliseconds since the Unix epoch, when the token carried one.
    pub timestamp: Option<i64>,
    pub format: TokenFormat,
}

/// One decoding strategy for share tokens.
///
/// Implementations absorb every failure of their own and report it as
/// `None`, so that a later decoder in the list still gets its turn.
pub trait FragmentDecoder {
    /// Format this decoder understands.
    fn format(&self) -> TokenFormat;

    /// Decodes a token with the fragment marker already stripped.
    fn decode(&self, token: &str) -> Option<DecodedShare>;
}

/// Decoder for the current LZ compressed format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Compressed;

/// Decoder for the legacy base64 format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Legacy;

/// Decoders in precedence order: current format first.
pub const DEFAULT_DECODERS: [&dyn FragmentDecoder; 2] = [&Compressed, &Legacy];

impl FragmentDecoder for Compressed {
    fn format(&self) -> TokenFormat {
        TokenFormat::Compressed
    }

    fn decode(&self, token: &str) -> Option<DecodedShare> {
        let text = match lz::decompress_from_uri_component(token) {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!(format = %self.format(), "token did not decompress");
                return None;
            }
        };

        // Decompressing arbitrary text sometimes succeeds by coincidence;
        // only a JSON object with a string `c` counts.
        let value = parse_json(&text, self.format())?;
        let content = string_field(&value, &["c"])?;

        Some(DecodedShare {
            content,
            timestamp: value.get("t").and_then(Value::as_i64),
            format: self.format(),
        })
    }
}

impl FragmentDecoder for Legacy {
    fn format(&self) -> TokenFormat {
        TokenFormat::Legacy
    }

    fn decode(&self, token: &str) -> Option<DecodedShare> {
        let compact: String = token
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();

        let bytes = match LEGACY_BASE64.decode(compact.as_bytes()) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(format = %self.format(), error = %e, "token is not base64");
                return None;
            }
        };

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => {
                debug!(format = %self.format(), error = %e, "token bytes are not UTF-8");
                return None;
            }
        };

        let value = parse_json(&text, self.format())?;
        // Earliest builds wrote the content under `c`.
        let content = string_field(&value, &["content", "c"])?;

        Some(DecodedShare {
            content,
            timestamp: ["timestamp", "t"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_i64)),
            format: self.format(),
        })
    }
}

fn parse_json(text: &str, format: TokenFormat) -> Option<Value> {
    match serde_json::from_str(text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(%format, error = %e, "decoded token is not JSON");
            None
        }
    }
}

fn string_field(value: &Value, keys: &[&str]) -> Option<String> {
    let found = keys
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str));

    if found.is_none() {
        debug!(?keys, "decoded token has no content field");
    }

    found.map(String::from)
}
