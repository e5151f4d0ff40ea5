//! In-memory transport that records every delivered message.

use super::{OutgoingMail, Transport};

/// Owned copy of a delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    /// Recipients, joined with `", "`.
    pub to: String,
    /// Encoded subject.
    pub subject: String,
    /// Rendered body.
    pub body: String,
    /// Rendered header block.
    pub headers: String,
    /// Extra transport parameters.
    pub extra_params: Option<String>,
}

impl From<&OutgoingMail<'_>> for SentMail {
    fn from(mail: &OutgoingMail<'_>) -> Self {
        Self {
            to: mail.to.to_string(),
            subject: mail.subject.to_string(),
            body: mail.body.to_string(),
            headers: mail.headers.to_string(),
            extra_params: mail.extra_params.map(str::to_string),
        }
    }
}

/// Transport that keeps delivered messages in memory.
///
/// Useful in tests and dry runs. A rejecting transport still records the
/// message it was offered.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    sent: Vec<SentMail>,
    reject: bool,
}

impl MemoryTransport {
    /// Creates a transport that accepts every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport that rejects every message.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            sent: Vec::new(),
            reject: true,
        }
    }

    /// Returns the messages offered so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[SentMail] {
        &self.sent
    }

    /// Returns the most recently offered message.
    #[must_use]
    pub fn last(&self) -> Option<&SentMail> {
        self.sent.last()
    }
}

impl Transport for MemoryTransport {
    fn deliver(&mut self, mail: &OutgoingMail<'_>) -> bool {
        self.sent.push(SentMail::from(mail));
        !self.reject
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const MAIL: OutgoingMail<'static> = OutgoingMail {
        to: "bob@example.com",
        subject: "s",
        body: "b",
        headers: "",
        extra_params: Some("-fx@example.com"),
    };

    #[test]
    fn test_records_messages() {
        let mut transport = MemoryTransport::new();
        assert!(transport.deliver(&MAIL));
        assert!(transport.deliver(&MAIL));
        assert_eq!(transport.messages().len(), 2);
        assert_eq!(
            transport.last().unwrap().extra_params.as_deref(),
            Some("-fx@example.com")
        );
    }

    #[test]
    fn test_rejecting() {
        let mut transport = MemoryTransport::rejecting();
        assert!(!transport.deliver(&MAIL));
        assert_eq!(transport.messages().len(), 1);
    }
}
