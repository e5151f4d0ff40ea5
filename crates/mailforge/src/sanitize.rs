//! Sanitization of untrusted input bound for header fields.
//!
//! Everything that ends up in an address header passes through here, so no
//! caller-supplied value can inject a line break or close an angle-bracket
//! address early.

use mailforge_mime::encoding::encode_word;

/// Characters allowed in an address after sanitization, besides ASCII
/// letters and digits.
const EMAIL_SPECIALS: &str = "!#$%&'*+-=?^_`{|}~@.[]";

/// Characters trimmed from names and encoded values. Unicode whitespace
/// such as U+00A0 is kept.
const TRIM_SET: [char; 6] = [' ', '\t', '\n', '\r', '\0', '\x0B'];

/// Cleans an email address.
///
/// Removes CR, LF, TAB, double quotes, commas and angle brackets, then
/// drops every remaining character that is not an ASCII letter, digit or
/// one of ``!#$%&'*+-=?^_`{|}~@.[]``.
#[must_use]
pub fn filter_email(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t' | '"' | ',' | '<' | '>'))
        .filter(|&c| c.is_ascii_alphanumeric() || EMAIL_SPECIALS.contains(c))
        .collect()
}

/// Cleans a display name.
///
/// Strips tag-like `<...>` substrings and ASCII control characters,
/// replaces `"` with `'`, `<` with `[` and `>` with `]`, and trims the
/// result.
#[must_use]
pub fn filter_name(raw: &str) -> String {
    let filtered: String = strip_tags(raw)
        .chars()
        .filter(|c| !c.is_ascii_control())
        .map(|c| match c {
            '"' => '\'',
            '<' => '[',
            '>' => ']',
            other => other,
        })
        .collect();

    filtered.trim_matches(TRIM_SET).to_string()
}

/// Removes ASCII control characters below 0x20, leaving everything else.
#[must_use]
pub fn filter_other(raw: &str) -> String {
    raw.chars().filter(|&c| c >= '\u{20}').collect()
}

/// Cleans an attachment file name for use as a quoted MIME parameter.
///
/// Control characters are removed and `"` becomes `'`.
#[must_use]
pub fn filter_filename(raw: &str) -> String {
    filter_other(raw).replace('"', "'")
}

/// Encodes a header value as RFC 2047 encoded-words.
///
/// The value is trimmed first. A value containing whitespace is split on
/// single spaces, every piece is encoded on its own, and the pieces are
/// joined with the encoded-word of a single space rather than a literal
/// space. Anything else becomes one encoded-word.
#[must_use]
pub fn encode_utf8(value: &str) -> String {
    let value = value.trim_matches(TRIM_SET);

    if value.contains(|c: char| c.is_ascii_whitespace() || c == '\x0B') {
        let separator = encode_word(" ");
        return value
            .split(' ')
            .map(encode_word)
            .collect::<Vec<_>>()
            .join(&separator);
    }

    encode_word(value)
}

/// Formats an address for a header field.
///
/// Returns the filtered address alone when `name` is empty, otherwise
/// `"<encoded name>" <address>`.
#[must_use]
pub fn format_address(email: &str, name: &str) -> String {
    let email = filter_email(email);
    if name.is_empty() {
        return email;
    }

    let name = encode_utf8(&filter_name(name));
    format!("\"{name}\" <{email}>")
}

/// Removes `<...>` tags.
///
/// A `<` followed by whitespace or at the end of input is literal text. An
/// unterminated tag swallows the rest of the input.
fn strip_tags(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '<' {
            result.push(c);
            continue;
        }

        match chars.peek() {
            Some(next) if !next.is_whitespace() => {
                for skipped in chars.by_ref() {
                    if skipped == '>' {
                        break;
                    }
                }
            }
            _ => result.push(c),
        }
    }

    result
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_email_plain() {
        assert_eq!(filter_email("user@example.com"), "user@example.com");
    }

    #[test]
    fn test_filter_email_strips_injection() {
        assert_eq!(
            filter_email("user@example.com\r\nBcc: victim@example.com"),
            "user@example.comBccvictim@example.com"
        );
        assert_eq!(filter_email("\"Bob\" <bob@example.com>,"), "Bobbob@example.com");
    }

    #[test]
    fn test_filter_email_whitelist() {
        assert_eq!(filter_email("jo hn(x)@exämple.com"), "johnx@exmple.com");
        assert_eq!(filter_email("a+b=c{d}|e~@[127.0.0.1]"), "a+b=c{d}|e~@[127.0.0.1]");
    }

    #[test]
    fn test_filter_name_replacements() {
        assert_eq!(filter_name("Bob \"The\" Builder"), "Bob 'The' Builder");
        assert_eq!(filter_name("a < b > c"), "a [ b ] c");
    }

    #[test]
    fn test_filter_name_strips_tags_and_controls() {
        assert_eq!(filter_name("John <b>Doe</b>"), "John Doe");
        assert_eq!(filter_name("  Jane\r\n\tDoe  "), "JaneDoe");
        assert_eq!(filter_name("Eve <script"), "Eve");
    }

    #[test]
    fn test_filter_name_keeps_unicode_whitespace() {
        assert_eq!(filter_name("\u{a0}Bob\u{3000}"), "\u{a0}Bob\u{3000}");
        assert_eq!(filter_name(" \0Bob\x0B "), "Bob");
    }

    #[test]
    fn test_filter_filename() {
        assert_eq!(filter_filename("re\"port\r\n.pdf"), "re'port.pdf");
        assert_eq!(filter_filename("résumé.pdf"), "résumé.pdf");
    }

    #[test]
    fn test_filter_other() {
        assert_eq!(filter_other("Hello\r\nWorld\t!"), "HelloWorld!");
        assert_eq!(filter_other("Héllo <World>"), "Héllo <World>");
    }

    #[test]
    fn test_encode_utf8_single_word() {
        assert_eq!(encode_utf8("Test"), "=?UTF-8?B?VGVzdA==?=");
        assert_eq!(encode_utf8("  Test \n"), "=?UTF-8?B?VGVzdA==?=");
    }

    #[test]
    fn test_encode_utf8_words_joined_by_encoded_space() {
        let encoded = encode_utf8("Mail Bot");
        assert_eq!(encoded, "=?UTF-8?B?TWFpbA==?==?UTF-8?B?IA==?==?UTF-8?B?Qm90?=");
        assert!(!encoded.contains(' '));
    }

    #[test]
    fn test_encode_utf8_empty() {
        assert_eq!(encode_utf8(""), "=?UTF-8?B??=");
    }

    #[test]
    fn test_format_address_without_name() {
        assert_eq!(format_address("bob@example.com", ""), "bob@example.com");
        assert_eq!(format_address("<bob@example.com>", ""), "bob@example.com");
    }

    #[test]
    fn test_format_address_with_name() {
        assert_eq!(
            format_address("bob@example.com", "Bob"),
            "\"=?UTF-8?B?Qm9i?=\" <bob@example.com>"
        );
    }

    #[test]
    fn test_strip_tags_literal_angle() {
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_tags("x<"), "x<");
        assert_eq!(strip_tags("<i>y</i>"), "y");
    }
}
