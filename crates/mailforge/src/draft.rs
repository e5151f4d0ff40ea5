//! Declarative message drafts.
//!
//! A [`Draft`] describes a whole message with named fields so it can be
//! loaded from JSON and checked before anything is rendered.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sanitize::filter_email;

/// An address with an optional display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address.
    pub email: String,
    /// Display name; empty for none.
    #[serde(default)]
    pub name: String,
}

impl Contact {
    /// Creates a contact with a display name.
    #[must_use]
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
        }
    }
}

/// A header whose value is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHeader {
    /// Header name.
    pub name: String,
    /// Header value.
    pub value: String,
}

/// A file to attach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAttachment {
    /// Path of the file to read.
    pub path: PathBuf,
    /// File name shown to the recipient; defaults to the path's file name.
    #[serde(default)]
    pub filename: Option<String>,
}

/// Complete description of a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    /// `To` recipients.
    pub to: Vec<Contact>,
    /// `From` address.
    pub from: Option<Contact>,
    /// `Reply-To` address.
    pub reply_to: Option<Contact>,
    /// `Cc` addresses.
    pub cc: Vec<Contact>,
    /// `Bcc` addresses.
    pub bcc: Vec<Contact>,
    /// Subject line.
    pub subject: Option<String>,
    /// Message body.
    pub body: Option<String>,
    /// Additional verbatim headers.
    pub headers: Vec<RawHeader>,
    /// Files to attach.
    pub attachments: Vec<DraftAttachment>,
}

impl Draft {
    /// Parses and validates a draft from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the draft is invalid.
    pub fn from_json(json: &str) -> Result<Self> {
        let draft: Self = serde_json::from_str(json)?;
        draft.validate()?;
        Ok(draft)
    }

    /// Checks that every address survives sanitization and every raw header
    /// name is a single token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let contacts = self
            .to
            .iter()
            .map(|c| ("to", c))
            .chain(self.from.iter().map(|c| ("from", c)))
            .chain(self.reply_to.iter().map(|c| ("reply_to", c)))
            .chain(self.cc.iter().map(|c| ("cc", c)))
            .chain(self.bcc.iter().map(|c| ("bcc", c)));

        for (field, contact) in contacts {
            if filter_email(&contact.email).is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "{field}: invalid address {:?}",
                    contact.email
                )));
            }
        }

        for header in &self.headers {
            if !is_header_name(&header.name) {
                return Err(Error::InvalidConfig(format!(
                    "invalid header name {:?}",
                    header.name
                )));
            }
        }

        for attachment in &self.attachments {
            if attachment.path.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(
                    "attachment path is empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Header field names are printable ASCII without spaces or colons (RFC 5322).
fn is_header_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_graphic() && b != b':')
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
    fn test_from_json() {
        let draft = Draft::from_json(
            r#"{
                "to": [{ "email": "bob@example.com", "name": "Bob" }],
                "from": { "email": "alice@example.com" },
                "subject": "Hello",
                "headers": [{ "name": "X-Mailer", "value": "mailforge" }],
                "attachments": [{ "path": "/tmp/report.pdf" }]
            }"#,
        )
        .unwrap();

        assert_eq!(draft.to, vec![Contact::new("bob@example.com", "Bob")]);
        assert_eq!(draft.from.as_ref().unwrap().name, "");
        assert_eq!(draft.subject.as_deref(), Some("Hello"));
        assert!(draft.cc.is_empty());
        assert!(draft.attachments[0].filename.is_none());
    }

    #[test]
    fn test_empty_draft_is_valid() {
        assert!(Draft::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_unusable_address() {
        let draft = Draft {
            cc: vec![Contact::new("<>", "")],
            ..Draft::default()
        };
        let err = draft.validate().unwrap_err();
        assert!(err.to_string().contains("cc"));
    }

    #[test]
    fn test_rejects_bad_header_name() {
        for name in ["", "X Mailer", "X-Mailer:", "X-\r\nBcc"] {
            let draft = Draft {
                headers: vec![RawHeader {
                    name: name.to_string(),
                    value: "v".to_string(),
                }],
                ..Draft::default()
            };
            assert!(draft.validate().is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(Draft::from_json("{"), Err(Error::Json(_))));
        assert!(matches!(
            Draft::from_json(r#"{ "to": [{ "email": "\"\"" }] }"#),
            Err(Error::InvalidConfig(_))
        ));
    }
}
