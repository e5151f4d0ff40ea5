//! Delivery of rendered messages.
//!
//! The builder never talks to a mail server itself. It renders the message
//! and hands an [`OutgoingMail`] to a [`Transport`], which reports whether
//! the message was accepted.

mod memory;
mod sendmail;

pub use memory::{MemoryTransport, SentMail};
pub use sendmail::SendmailTransport;

use mailforge_mime::EOL;

/// A fully rendered message, ready for delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutgoingMail<'a> {
    /// Recipients, joined with `", "`.
    pub to: &'a str,
    /// Encoded subject (empty if none was set).
    pub subject: &'a str,
    /// Rendered body.
    pub body: &'a str,
    /// Rendered header block, without `To` and `Subject`.
    pub headers: &'a str,
    /// Opaque extra parameters for the transport.
    pub extra_params: Option<&'a str>,
}

impl OutgoingMail<'_> {
    /// Renders the complete message text: `To`, `Subject`, the header block,
    /// a blank line and the body.
    #[must_use]
    pub fn to_message(self) -> String {
        let mut lines = vec![format!("To: {}", self.to), format!("Subject: {}", self.subject)];
        if !self.headers.is_empty() {
            lines.push(self.headers.to_string());
        }
        lines.push(String::new());
        lines.push(self.body.to_string());
        lines.join(EOL)
    }
}

/// Something that can deliver a rendered message.
pub trait Transport {
    /// Delivers the message, returning `true` if it was accepted.
    ///
    /// Failure causes are not reported to the caller.
    fn deliver(&mut self, mail: &OutgoingMail<'_>) -> bool;
}

impl<F> Transport for F
where
    F: FnMut(&OutgoingMail<'_>) -> bool,
{
    fn deliver(&mut self, mail: &OutgoingMail<'_>) -> bool {
        self(mail)
    }
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

    fn sample<'a>(headers: &'a str) -> OutgoingMail<'a> {
        OutgoingMail {
            to: "bob@example.com",
            subject: "=?UTF-8?B?SGk=?=",
            body: "Hello",
            headers,
            extra_params: None,
        }
    }

    #[test]
    fn test_to_message_with_headers() {
        let mail = sample("From: alice@example.com");
        let expected = [
            "To: bob@example.com",
            "Subject: =?UTF-8?B?SGk=?=",
            "From: alice@example.com",
            "",
            "Hello",
        ]
        .join(EOL);
        assert_eq!(mail.to_message(), expected);
    }

    #[test]
    fn test_to_message_without_headers() {
        let mail = sample("");
        let expected = ["To: bob@example.com", "Subject: =?UTF-8?B?SGk=?=", "", "Hello"].join(EOL);
        assert_eq!(mail.to_message(), expected);
    }

    #[test]
    fn test_closure_transport() {
        let mut seen = Vec::new();
        let mut transport = |mail: &OutgoingMail<'_>| {
            seen.push(mail.to.to_string());
            true
        };
        assert!(transport.deliver(&sample("")));
        assert_eq!(seen, vec!["bob@example.com".to_string()]);
    }
}
