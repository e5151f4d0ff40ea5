//! Error types for message composition and dispatch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while composing or sending a message.
#[derive(Debug, Error)]
pub enum Error {
    /// `send` was called before any recipient was added.
    #[error("Unable to send, no To address has been set")]
    NoRecipient,

    /// An attachment could not be opened or read.
    #[error("Failed to read attachment {}: {source}", .path.display())]
    Attachment {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The transport reported that the message was not accepted.
    #[error("Transport rejected the message")]
    Rejected,

    /// Configuration or draft validation failed.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the error was raised by input validation rather than
    /// I/O or delivery.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::NoRecipient | Self::InvalidConfig(_))
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
