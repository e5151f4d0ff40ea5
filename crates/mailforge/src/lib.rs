//! # mailforge
//!
//! Composes email messages and hands them to a pluggable transport.
//!
//! ## Features
//!
//! - **Header sanitization**: addresses, display names and subjects are
//!   stripped of anything that could inject extra header lines
//! - **Encoded-words**: display names and subjects are sent as
//!   `=?UTF-8?B?...?=` so any UTF-8 text survives 7-bit headers
//! - **Attachments**: files are Base64 encoded into a `multipart/mixed` body
//! - **Transports**: sendmail pipe, in-memory recorder, or any closure
//! - **Drafts**: whole messages described as JSON and validated up front
//!
//! ## Quick Start
//!
//! ```no_run
//! use mailforge::{MessageBuilder, SendmailTransport};
//!
//! # fn main() -> mailforge::Result<()> {
//! let mut message = MessageBuilder::new();
//! message
//!     .add_recipient("recipient@example.com", "Recipient")
//!     .set_subject("Test Message")
//!     .set_from("bot@example.com", "Mail Bot")
//!     .add_named_header("Reply-To", "sender@example.com", "Mail Bot")
//!     .add_raw_header("X-Mailer", "mailforge")
//!     .set_body("<strong>This is a test message.</strong>");
//! message.add_attachment("report.pdf", None)?;
//!
//! message.send(&mut SendmailTransport::new())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`boundary`]: MIME boundary sources
//! - [`sanitize`]: address, name and free-text filters
//! - [`transport`]: the [`Transport`] trait and bundled transports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod boundary;
mod builder;
mod config;
mod draft;
mod error;
pub mod sanitize;
pub mod transport;

pub use boundary::{BoundarySource, RandomBoundary, SequentialBoundary};
pub use builder::{Attachment, MessageBuilder, MessageSnapshot};
pub use config::{ComposerConfig, ComposerConfigBuilder};
pub use draft::{Contact, Draft, DraftAttachment, RawHeader};
pub use error::{Error, Result};
pub use transport::{MemoryTransport, OutgoingMail, SendmailTransport, SentMail, Transport};
