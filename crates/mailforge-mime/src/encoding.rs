//! Transfer and header encodings.
//!
//! Supports Base64 bodies wrapped for transport and RFC 2047 `B` encoded-words.

use crate::error::{Error, Result};
use crate::text::EOL;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Maximum line length of a Base64 body (RFC 2045).
pub const BASE64_LINE_LENGTH: usize = 76;

/// Charset label used in every encoded-word.
const CHARSET: &str = "UTF-8";

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Encodes data as Base64 split into lines of [`BASE64_LINE_LENGTH`].
///
/// Every line, the last one included, is followed by [`EOL`]. Empty input
/// yields an empty string.
#[must_use]
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = encode_base64(data);
    let mut result = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_LENGTH * 2 + 2);

    // Base64 output is pure ASCII, so byte chunks are char boundaries.
    for chunk in encoded.as_bytes().chunks(BASE64_LINE_LENGTH) {
        result.push_str(&String::from_utf8_lossy(chunk));
        result.push_str(EOL);
    }

    result
}

/// Encodes a value as a single RFC 2047 encoded-word.
///
/// Format: `=?UTF-8?B?<base64>?=`. The value is always encoded, even when
/// it is plain ASCII.
#[must_use]
pub fn encode_word(text: &str) -> String {
    format!("=?{CHARSET}?B?{}?=", encode_base64(text.as_bytes()))
}

/// Decodes a single RFC 2047 encoded-word.
///
/// Input that is not framed as `=?...?=` is returned unchanged. Only the
/// `B` encoding is understood.
///
/// # Errors
///
/// Returns an error if the framing is malformed, the encoding is not `B`,
/// or the payload is not valid Base64 / UTF-8.
pub fn decode_word(text: &str) -> Result<String> {
    let Some(inner) = text.strip_prefix("=?").and_then(|t| t.strip_suffix("?=")) else {
        return Ok(text.to_string());
    };

    let parts: Vec<&str> = inner.split('?').collect();
    let [_charset, encoding, payload] = parts.as_slice() else {
        return Err(Error::InvalidEncoding(format!(
            "Invalid encoded-word: {text}"
        )));
    };

    if !encoding.eq_ignore_ascii_case("B") {
        return Err(Error::InvalidEncoding(format!(
            "Unsupported encoding: {encoding}"
        )));
    }

    let decoded = decode_base64(payload)?;
    String::from_utf8(decoded).map_err(Into::into)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::redundant_clone, clippy::manual_string_new, clippy::needless_collect, clippy::unreadable_literal, clippy::used_underscore_items, clippy::similar_names)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_encode_decode() {
        let data = b"Hello, World!";
        let encoded = encode_base64(data);
        assert_eq!(encoded, "SGVsbG8sIFdvcmxkIQ==");

        let decoded = decode_base64(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_base64_wrapped_short() {
        let wrapped = encode_base64_wrapped(b"Hello, World!");
        assert_eq!(wrapped, format!("SGVsbG8sIFdvcmxkIQ=={EOL}"));
    }

    #[test]
    fn test_base64_wrapped_line_length() {
        let data = vec![0xAB_u8; 200];
        let wrapped = encode_base64_wrapped(&data);

        let lines: Vec<&str> = wrapped.split(EOL).collect();
        // Trailing terminator leaves an empty last piece
        assert_eq!(lines.last(), Some(&""));
        for line in &lines[..lines.len() - 2] {
            assert_eq!(line.len(), BASE64_LINE_LENGTH);
        }
        assert!(lines[lines.len() - 2].len() <= BASE64_LINE_LENGTH);

        let joined: String = lines.concat();
        assert_eq!(decode_base64(&joined).unwrap(), data);
    }

    #[test]
    fn test_base64_wrapped_empty() {
        assert_eq!(encode_base64_wrapped(b""), "");
    }

    #[test]
    fn test_encode_word() {
        assert_eq!(encode_word("Hello"), "=?UTF-8?B?SGVsbG8=?=");
        assert_eq!(encode_word(" "), "=?UTF-8?B?IA==?=");
        assert_eq!(encode_word(""), "=?UTF-8?B??=");
    }

    #[test]
    fn test_decode_word() {
        assert_eq!(decode_word("=?UTF-8?B?SMOpbGxv?=").unwrap(), "Héllo");
        assert_eq!(decode_word("=?utf-8?b?SGVsbG8=?=").unwrap(), "Hello");
        assert_eq!(decode_word("plain").unwrap(), "plain");
    }

    #[test]
    fn test_decode_word_rejects_q() {
        assert!(decode_word("=?UTF-8?Q?H=C3=A9llo?=").is_err());
        assert!(decode_word("=?UTF-8?B?=").is_err());
    }

    #[test]
    fn test_encode_decode_word_non_ascii() {
        let text = "Zoë Ångström";
        assert_eq!(decode_word(&encode_word(text)).unwrap(), text);
    }
}
