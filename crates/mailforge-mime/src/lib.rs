//! # mailforge-mime
//!
//! Wire-level building blocks for composing email messages.
//!
//! ## Features
//!
//! - **Encoded-words**: RFC 2047 `=?UTF-8?B?...?=` header encoding and decoding
//! - **Base64 bodies**: attachment payloads wrapped at 76 columns
//! - **Plain text**: word-boundary soft wrapping and lone-dot stuffing
//! - **Content types**: ordered, quoted MIME content type parameters
//!
//! ## Quick Start
//!
//! ```
//! use mailforge_mime::ContentType;
//! use mailforge_mime::encoding::{decode_word, encode_word};
//! use mailforge_mime::text::{dot_stuff, word_wrap};
//!
//! let word = encode_word("Héllo");
//! assert_eq!(decode_word(&word).unwrap(), "Héllo");
//!
//! assert_eq!(dot_stuff("a\n.\nb"), "a\n..\nb");
//! assert!(!word_wrap("a short line", 78).contains('\n'));
//!
//! let ct = ContentType::multipart_mixed("b1");
//! assert_eq!(ct.to_string(), "multipart/mixed; boundary=\"b1\"");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod content_type;
mod error;

pub mod encoding;
pub mod text;

pub use content_type::ContentType;
pub use error::{Error, Result};
pub use text::EOL;
