//! End-to-end tests: build messages, send them through an in-memory
//! transport and inspect what the transport received.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::PathBuf;

use mailforge::{
    ComposerConfig, Contact, Draft, DraftAttachment, Error, MemoryTransport, MessageBuilder,
    OutgoingMail, SequentialBoundary,
};
use mailforge_mime::EOL;
use mailforge_mime::encoding::{decode_base64, decode_word};

/// Writes `contents` to a per-test file in the temp directory.
fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mailforge-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn builder() -> MessageBuilder {
    MessageBuilder::new().with_boundary_source(SequentialBoundary::new("mf-"))
}

#[test]
fn sends_multipart_message_with_two_attachments() {
    let first = temp_file("first.txt", b"first attachment");
    let second = temp_file("second.bin", &[0_u8, 1, 2, 3, 254, 255]);

    let mut message = builder();
    message
        .add_recipient("bob@example.com", "Bob")
        .set_subject("Test")
        .set_body("Only line");
    message.add_attachment(&first, None).unwrap();
    message.add_attachment(&second, Some("renamed.bin")).unwrap();

    let mut transport = MemoryTransport::new();
    message.send(&mut transport).unwrap();
    let sent = transport.last().unwrap();

    assert_eq!(sent.to, "\"=?UTF-8?B?Qm9i?=\" <bob@example.com>");
    assert_eq!(sent.subject, "=?UTF-8?B?VGVzdA==?=");
    assert_eq!(
        sent.headers,
        format!("MIME-Version: 1.0{EOL}Content-Type: multipart/mixed; boundary=\"mf-0000\"")
    );

    let body = &sent.body;
    assert_eq!(body.matches("Content-Disposition: attachment").count(), 2);

    let first_at = body
        .find("Content-Disposition: attachment; filename=\"first.txt\"")
        .unwrap();
    let second_at = body
        .find("Content-Disposition: attachment; filename=\"renamed.bin\"")
        .unwrap();
    assert!(first_at < second_at);

    // Each attachment part starts right after a delimiter line
    for part in body.split(&format!("--mf-0000{EOL}")).skip(2) {
        assert!(part.starts_with("Content-Type: application/octet-stream"));
    }
    assert_eq!(body.matches("--mf-0000").count(), 4);
    assert!(body.ends_with("--mf-0000"));
    assert!(!body.contains("--mf-0000--"));
}

#[test]
fn attachment_payload_decodes_to_file_contents() {
    let contents: Vec<u8> = (0..=255).cycle().take(1000).collect();
    let path = temp_file("payload.bin", &contents);

    let mut message = builder();
    message.add_attachment(&path, None).unwrap();

    let attachment = &message.attachments()[0];
    assert_eq!(attachment.filename, "payload.bin");
    for line in attachment.data.split(EOL) {
        assert!(line.len() <= 76);
    }
    let joined: String = attachment.data.split(EOL).collect();
    assert_eq!(decode_base64(&joined).unwrap(), contents);
}

#[test]
fn empty_filename_falls_back_to_base_name() {
    let path = temp_file("fallback.txt", b"x");
    let mut message = builder();
    message.add_attachment(&path, Some("")).unwrap();
    assert_eq!(message.attachments()[0].filename, "fallback.txt");
}

#[test]
fn unreadable_attachment_never_reaches_transport() {
    let mut message = builder();
    message.add_recipient("bob@example.com", "");

    let err = message
        .add_attachment("/nonexistent/mailforge/missing.pdf", None)
        .unwrap_err();
    match err {
        Error::Attachment { path, .. } => {
            assert_eq!(path, PathBuf::from("/nonexistent/mailforge/missing.pdf"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The message is unchanged and still plain
    let mut transport = MemoryTransport::new();
    message.send(&mut transport).unwrap();
    assert!(!transport.last().unwrap().headers.contains("multipart"));
}

#[test]
fn send_without_recipient_fails_for_any_state() {
    let path = temp_file("norecipient.txt", b"x");
    let mut message = builder();
    message
        .set_subject("s")
        .set_from("alice@example.com", "Alice")
        .add_cc("carol@example.com", "")
        .set_body("body");
    message.add_attachment(&path, None).unwrap();

    let mut calls = 0;
    let mut transport = |_: &OutgoingMail<'_>| {
        calls += 1;
        true
    };
    assert!(matches!(
        message.send(&mut transport),
        Err(Error::NoRecipient)
    ));
    assert_eq!(calls, 0);
}

#[test]
fn named_headers_are_sanitized() {
    let mut message = builder();
    message
        .add_recipient("bob@example.com\r\nBcc: evil@example.com", "")
        .set_from("alice@example.com", "Alice\r\nBcc: evil@example.com");

    for value in message.recipients().iter().chain(message.headers()) {
        assert!(!value.contains('\r'));
        assert!(!value.contains('\n'));
    }
}

#[test]
fn display_name_decodes_back() {
    let mut message = builder();
    message.set_from("zoe@example.com", "Zoë Ångström");
    let header = &message.headers()[0];

    let encoded = header
        .strip_prefix("From: \"")
        .and_then(|rest| rest.split_once("\" <"))
        .map(|(name, _)| name)
        .unwrap();
    let marker = "=?UTF-8?B?IA==?=";
    let decoded: Vec<String> = encoded
        .split(marker)
        .map(|word| decode_word(word).unwrap())
        .collect();
    assert_eq!(decoded.join(" "), "Zoë Ångström");
}

#[test]
fn send_can_be_repeated() {
    let mut message = builder();
    message.add_recipient("bob@example.com", "").set_body("x");

    let mut transport = MemoryTransport::new();
    message.send(&mut transport).unwrap();
    message.send(&mut transport).unwrap();
    assert_eq!(transport.messages().len(), 2);
    assert_eq!(transport.messages()[0], transport.messages()[1]);
}

#[test]
fn draft_builds_complete_message() {
    let path = temp_file("draft.txt", b"draft attachment");
    let draft = Draft {
        to: vec![Contact::new("bob@example.com", "Bob")],
        from: Some(Contact::new("alice@example.com", "")),
        reply_to: Some(Contact::new("replies@example.com", "")),
        cc: vec![Contact::new("carol@example.com", "")],
        bcc: vec![Contact::new("dave@example.com", "")],
        subject: Some("Quarterly".to_string()),
        body: Some("See attached.\n.\nThanks".to_string()),
        headers: vec![mailforge::RawHeader {
            name: "X-Mailer".to_string(),
            value: "mailforge".to_string(),
        }],
        attachments: vec![DraftAttachment {
            path,
            filename: Some("report.txt".to_string()),
        }],
    };

    let config = ComposerConfig::builder()
        .extra_params("-falice@example.com")
        .build()
        .unwrap();
    let message = MessageBuilder::from_draft(&draft, config)
        .unwrap()
        .with_boundary_source(SequentialBoundary::default());

    assert_eq!(
        message.headers(),
        [
            "From: alice@example.com",
            "Reply-To: replies@example.com",
            "Cc: carol@example.com",
            "Bcc: dave@example.com",
            "X-Mailer: mailforge",
        ]
    );
    assert_eq!(message.body(), Some("See attached.\n..\nThanks"));

    let mut transport = MemoryTransport::new();
    message.send(&mut transport).unwrap();
    let sent = transport.last().unwrap();
    assert_eq!(sent.extra_params.as_deref(), Some("-falice@example.com"));
    assert!(sent.body.contains("filename=\"report.txt\""));
    assert!(sent.headers.contains("boundary=\"b0000\""));
}

#[test]
fn draft_with_missing_attachment_fails() {
    let draft = Draft {
        to: vec![Contact::new("bob@example.com", "")],
        attachments: vec![DraftAttachment {
            path: PathBuf::from("/nonexistent/mailforge/draft.bin"),
            filename: None,
        }],
        ..Draft::default()
    };
    assert!(matches!(
        MessageBuilder::from_draft(&draft, ComposerConfig::default()),
        Err(Error::Attachment { .. })
    ));
}
