//! Property tests for sanitization and message rendering.

#![allow(clippy::unwrap_used)]

use mailforge::sanitize::{encode_utf8, filter_email, filter_name, filter_other, format_address};
use mailforge::{Error, MemoryTransport, MessageBuilder, SequentialBoundary};
use mailforge_mime::encoding::decode_word;
use proptest::prelude::*;

/// Encoded-word of a single space, used between encoded words.
const SPACE_WORD: &str = "=?UTF-8?B?IA==?=";

proptest! {
    #[test]
    fn filtered_email_has_no_injection_chars(raw in "\\PC*|[\\r\\n\\t\",<>a-z@.]*") {
        let email = filter_email(&raw);
        prop_assert!(!email.contains(['\r', '\n', '\t', '"', ',', '<', '>']));
    }

    #[test]
    fn filtered_other_has_no_low_controls(raw in any::<String>()) {
        prop_assert!(filter_other(&raw).chars().all(|c| c >= ' '));
    }

    #[test]
    fn encoded_name_decodes_to_filtered_name(raw in "[a-zA-Zéü<>\" \\t]{0,40}") {
        let name = filter_name(&raw);
        let encoded = encode_utf8(&name);
        let decoded: Vec<String> = encoded
            .split(SPACE_WORD)
            .map(|word| decode_word(word).unwrap())
            .collect();
        prop_assert_eq!(decoded.join(" "), name);
    }

    #[test]
    fn address_without_name_is_filtered_email(email in "\\PC{0,40}") {
        prop_assert_eq!(format_address(&email, ""), filter_email(&email));
    }

    #[test]
    fn send_without_recipient_always_fails(
        subject in "\\PC{0,20}",
        body in "\\PC{0,80}",
        attach in any::<bool>(),
    ) {
        let mut message = MessageBuilder::new().with_boundary_source(SequentialBoundary::default());
        message.set_subject(&subject).set_body(&body).set_from("a@example.com", "A");
        if attach {
            message.add_attachment_bytes("a.bin", body.as_bytes());
        }

        let mut transport = MemoryTransport::new();
        prop_assert!(matches!(message.send(&mut transport), Err(Error::NoRecipient)));
        prop_assert!(transport.messages().is_empty());
    }

    #[test]
    fn plain_render_is_idempotent(body in "[a-z .\\n]{0,200}", wrap in 1usize..100) {
        let mut message = MessageBuilder::new();
        message.set_wrap(wrap).set_body(&body);
        prop_assert_eq!(message.render_plain_body(), message.render_plain_body());
    }
}
