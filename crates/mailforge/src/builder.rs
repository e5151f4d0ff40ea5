//! Message builder: accumulates message parts, renders them and hands the
//! result to a transport.

use std::fs;
use std::path::Path;

use mailforge_mime::encoding::encode_base64_wrapped;
use mailforge_mime::text::{DEFAULT_WRAP_COLUMN, dot_stuff, word_wrap};
use mailforge_mime::{ContentType, EOL};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::boundary::{BoundarySource, RandomBoundary};
use crate::config::ComposerConfig;
use crate::draft::Draft;
use crate::error::{Error, Result};
use crate::sanitize::{encode_utf8, filter_filename, filter_other, format_address};
use crate::transport::{OutgoingMail, Transport};

/// Preamble shown by mail readers that do not understand MIME.
const MULTIPART_PREAMBLE: &str = "This is a multi-part message in MIME format.";

/// A file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// File name shown to the recipient.
    pub filename: String,
    /// Base64 payload, wrapped at 76 columns.
    pub data: String,
}

/// Read-only view of a builder's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageSnapshot {
    /// Rendered `To` addresses.
    pub to: Vec<String>,
    /// Encoded subject.
    pub subject: Option<String>,
    /// Dot-stuffed body.
    pub body: Option<String>,
    /// Raw header lines.
    pub headers: Vec<String>,
    /// Extra transport parameters.
    pub extra_params: Option<String>,
    /// Soft-wrap column.
    pub wrap_column: usize,
    /// Attachment file names, in registration order.
    pub attachments: Vec<String>,
    /// Current MIME boundary.
    pub boundary: String,
}

/// Composes an email message and sends it through a [`Transport`].
///
/// Setters return `&mut Self` so calls can be chained:
///
/// ```
/// use mailforge::{MemoryTransport, MessageBuilder};
///
/// let mut builder = MessageBuilder::new();
/// builder
///     .add_recipient("bob@example.com", "Bob")
///     .set_subject("Hello")
///     .set_from("alice@example.com", "Alice")
///     .set_body("Hi Bob!");
///
/// let mut transport = MemoryTransport::new();
/// builder.send(&mut transport).unwrap();
/// assert_eq!(transport.messages().len(), 1);
/// ```
#[derive(Debug)]
pub struct MessageBuilder {
    config: ComposerConfig,
    boundary_source: Box<dyn BoundarySource>,
    recipients: Vec<String>,
    subject: Option<String>,
    body: Option<String>,
    headers: Vec<String>,
    wrap_column: usize,
    extra_params: Option<String>,
    attachments: Vec<Attachment>,
    boundary: String,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageBuilder {
    /// Creates a builder with the default configuration and random boundaries.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(ComposerConfig::default(), Box::new(RandomBoundary))
    }

    /// Creates a builder from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_config(config: ComposerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, Box::new(RandomBoundary)))
    }

    /// Creates a builder from a configuration and a draft.
    ///
    /// The draft is validated first, then applied in order: recipients,
    /// subject, `From`, `Reply-To`, `Cc`, `Bcc`, raw headers, body and
    /// attachments.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration or draft is invalid, or if an
    /// attachment cannot be read.
    pub fn from_draft(draft: &Draft, config: ComposerConfig) -> Result<Self> {
        let mut builder = Self::with_config(config)?;
        builder.apply_draft(draft)?;
        Ok(builder)
    }

    fn from_parts(config: ComposerConfig, boundary_source: Box<dyn BoundarySource>) -> Self {
        let boundary = boundary_source.next_boundary();
        Self {
            wrap_column: config.wrap_column,
            extra_params: config.extra_params.clone(),
            config,
            boundary_source,
            recipients: Vec::new(),
            subject: None,
            body: None,
            headers: Vec::new(),
            attachments: Vec::new(),
            boundary,
        }
    }

    /// Replaces the boundary source and draws a new boundary from it.
    #[must_use]
    pub fn with_boundary_source(mut self, source: impl BoundarySource + 'static) -> Self {
        self.boundary_source = Box::new(source);
        self.boundary = self.boundary_source.next_boundary();
        self
    }

    /// Clears every field back to the configured state and draws a new boundary.
    pub fn reset(&mut self) -> &mut Self {
        self.recipients.clear();
        self.headers.clear();
        self.subject = None;
        self.body = None;
        self.wrap_column = self.config.wrap_column;
        self.extra_params.clone_from(&self.config.extra_params);
        self.attachments.clear();
        self.boundary = self.boundary_source.next_boundary();
        self
    }

    /// Applies a validated draft on top of the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is invalid or an attachment cannot be read.
    pub fn apply_draft(&mut self, draft: &Draft) -> Result<&mut Self> {
        draft.validate()?;

        for contact in &draft.to {
            self.add_recipient(&contact.email, &contact.name);
        }
        if let Some(subject) = &draft.subject {
            self.set_subject(subject);
        }
        if let Some(from) = &draft.from {
            self.set_from(&from.email, &from.name);
        }
        if let Some(reply_to) = &draft.reply_to {
            self.set_reply_to(&reply_to.email, &reply_to.name);
        }
        for contact in &draft.cc {
            self.add_cc(&contact.email, &contact.name);
        }
        for contact in &draft.bcc {
            self.add_bcc(&contact.email, &contact.name);
        }
        for header in &draft.headers {
            self.add_raw_header(&header.name, &header.value);
        }
        if let Some(body) = &draft.body {
            self.set_body(body);
        }
        for attachment in &draft.attachments {
            self.add_attachment(&attachment.path, attachment.filename.as_deref())?;
        }

        Ok(self)
    }

    /// Adds a `To` recipient. Duplicates are kept.
    pub fn add_recipient(&mut self, email: &str, name: &str) -> &mut Self {
        self.recipients.push(format_address(email, name));
        self
    }

    /// Sets the subject, stripping control characters and encoding it.
    pub fn set_subject(&mut self, subject: &str) -> &mut Self {
        self.subject = Some(encode_utf8(&filter_other(subject)));
        self
    }

    /// Adds an address header such as `From`, `Reply-To`, `Cc` or `Bcc`.
    ///
    /// The header name itself is not checked.
    pub fn add_named_header(&mut self, header: &str, email: &str, name: &str) -> &mut Self {
        let address = format_address(email, name);
        self.headers.push(format!("{header}: {address}"));
        self
    }

    /// Adds a header with a value that is used verbatim.
    ///
    /// Neither the name nor the value is sanitized; only pass trusted input.
    pub fn add_raw_header(&mut self, header: &str, value: &str) -> &mut Self {
        self.headers.push(format!("{header}: {value}"));
        self
    }

    /// Adds a `From` header.
    pub fn set_from(&mut self, email: &str, name: &str) -> &mut Self {
        self.add_named_header("From", email, name)
    }

    /// Adds a `Reply-To` header.
    pub fn set_reply_to(&mut self, email: &str, name: &str) -> &mut Self {
        self.add_named_header("Reply-To", email, name)
    }

    /// Adds a `Cc` header.
    pub fn add_cc(&mut self, email: &str, name: &str) -> &mut Self {
        self.add_named_header("Cc", email, name)
    }

    /// Adds a `Bcc` header.
    pub fn add_bcc(&mut self, email: &str, name: &str) -> &mut Self {
        self.add_named_header("Bcc", email, name)
    }

    /// Sets the body, rewriting lone `.` lines to `..`.
    pub fn set_body(&mut self, message: &str) -> &mut Self {
        self.body = Some(dot_stuff(message));
        self
    }

    /// Sets the soft-wrap column. Zero restores the default of 78.
    pub fn set_wrap(&mut self, column: usize) -> &mut Self {
        self.wrap_column = if column == 0 {
            DEFAULT_WRAP_COLUMN
        } else {
            column
        };
        self
    }

    /// Sets the extra parameters passed to the transport.
    pub fn set_extra_params(&mut self, params: &str) -> &mut Self {
        self.extra_params = Some(params.to_string());
        self
    }

    /// Attaches a file.
    ///
    /// The file is read completely and encoded right away. `filename`
    /// defaults to the final component of `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Attachment`] if the file cannot be read.
    pub fn add_attachment(
        &mut self,
        path: impl AsRef<Path>,
        filename: Option<&str>,
    ) -> Result<&mut Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| Error::Attachment {
            path: path.to_path_buf(),
            source,
        })?;

        let filename = match filename {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };

        debug!(path = %path.display(), filename = %filename, bytes = data.len(), "Attachment loaded");
        Ok(self.add_attachment_bytes(&filename, &data))
    }

    /// Attaches in-memory data under the given file name.
    ///
    /// Control characters are dropped from the name and `"` becomes `'`.
    pub fn add_attachment_bytes(&mut self, filename: &str, data: &[u8]) -> &mut Self {
        self.attachments.push(Attachment {
            filename: filter_filename(filename),
            data: encode_base64_wrapped(data),
        });
        self
    }

    /// Returns true if at least one attachment is registered.
    #[must_use]
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Returns the rendered `To` addresses.
    #[must_use]
    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Returns the encoded subject.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the dot-stuffed body.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the raw header lines in insertion order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Returns the soft-wrap column.
    #[must_use]
    pub const fn wrap_column(&self) -> usize {
        self.wrap_column
    }

    /// Returns the extra transport parameters.
    #[must_use]
    pub fn extra_params(&self) -> Option<&str> {
        self.extra_params.as_deref()
    }

    /// Returns the registered attachments.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the current MIME boundary.
    #[must_use]
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Returns an owned, serializable view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> MessageSnapshot {
        MessageSnapshot {
            to: self.recipients.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            headers: self.headers.clone(),
            extra_params: self.extra_params.clone(),
            wrap_column: self.wrap_column,
            attachments: self.attachments.iter().map(|a| a.filename.clone()).collect(),
            boundary: self.boundary.clone(),
        }
    }

    /// Renders the body soft-wrapped at the configured column.
    #[must_use]
    pub fn render_plain_body(&self) -> String {
        word_wrap(self.body.as_deref().unwrap_or_default(), self.wrap_column)
    }

    /// Renders the `multipart/mixed` body: the message as an HTML part
    /// followed by one part per attachment.
    ///
    /// Unless `close_multipart` is configured, the last delimiter is a plain
    /// `--boundary` line rather than the closing `--boundary--`.
    #[must_use]
    pub fn render_multipart_body(&self) -> String {
        let delimiter = format!("--{}", self.boundary);
        let mut body = vec![
            MULTIPART_PREAMBLE.to_string(),
            delimiter.clone(),
            format!("Content-Type: {}", ContentType::text_html()),
            "Content-Transfer-Encoding: 7bit".to_string(),
            String::new(),
            self.body.clone().unwrap_or_default(),
            String::new(),
            delimiter.clone(),
        ];

        for attachment in &self.attachments {
            body.push(format!(
                "Content-Type: {}",
                ContentType::octet_stream(&attachment.filename)
            ));
            body.push("Content-Transfer-Encoding: base64".to_string());
            body.push(format!(
                "Content-Disposition: attachment; filename=\"{}\"",
                attachment.filename
            ));
            body.push(String::new());
            body.push(attachment.data.clone());
            body.push(String::new());
            body.push(delimiter.clone());
        }

        if self.config.close_multipart {
            if let Some(last) = body.last_mut() {
                last.push_str("--");
            }
        }

        body.join(EOL)
    }

    /// Renders the MIME headers announcing a multipart body.
    #[must_use]
    pub fn render_mime_headers(&self) -> String {
        [
            "MIME-Version: 1.0".to_string(),
            format!(
                "Content-Type: {}",
                ContentType::multipart_mixed(&self.boundary)
            ),
        ]
        .join(EOL)
    }

    /// Renders the header block, appending the MIME headers when the
    /// message has attachments.
    #[must_use]
    pub fn render_headers(&self) -> String {
        let mut headers = self.headers.clone();
        if self.has_attachments() {
            headers.push(self.render_mime_headers());
        }
        headers.join(EOL)
    }

    /// Renders the body that will be sent: multipart when the message has
    /// attachments, plain otherwise.
    #[must_use]
    pub fn render_body(&self) -> String {
        if self.has_attachments() {
            self.render_multipart_body()
        } else {
            self.render_plain_body()
        }
    }

    /// Renders the message and hands it to `transport` exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRecipient`] if the `To` line is empty, because no
    /// recipient was added or every address filtered to nothing (the
    /// transport is not invoked), or [`Error::Rejected`] if the transport
    /// does not accept the message.
    pub fn send<T>(&self, transport: &mut T) -> Result<()>
    where
        T: Transport + ?Sized,
    {
        let to = self.recipients.join(", ");
        if to.is_empty() {
            return Err(Error::NoRecipient);
        }

        let headers = self.render_headers();
        let body = self.render_body();

        let mail = OutgoingMail {
            to: &to,
            subject: self.subject.as_deref().unwrap_or_default(),
            body: &body,
            headers: &headers,
            extra_params: self.extra_params.as_deref(),
        };

        info!(
            recipients = self.recipients.len(),
            attachments = self.attachments.len(),
            boundary = %self.boundary,
            "Handing message to transport"
        );

        if transport.deliver(&mail) {
            Ok(())
        } else {
            warn!(to = %to, "Transport rejected message");
            Err(Error::Rejected)
        }
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
    use crate::boundary::SequentialBoundary;
    use crate::transport::MemoryTransport;

    fn builder() -> MessageBuilder {
        MessageBuilder::new().with_boundary_source(SequentialBoundary::new("test-"))
    }

    #[test]
    fn test_new_state() {
        let b = builder();
        assert!(b.recipients().is_empty());
        assert!(b.subject().is_none());
        assert!(b.body().is_none());
        assert!(b.headers().is_empty());
        assert_eq!(b.wrap_column(), 78);
        assert!(b.extra_params().is_none());
        assert!(!b.has_attachments());
        assert_eq!(b.boundary(), "test-0000");
    }

    #[test]
    fn test_recipients_keep_duplicates() {
        let mut b = builder();
        b.add_recipient("bob@example.com", "")
            .add_recipient("bob@example.com", "");
        assert_eq!(b.recipients(), ["bob@example.com", "bob@example.com"]);
    }

    #[test]
    fn test_set_subject_filters_and_encodes() {
        let mut b = builder();
        b.set_subject("Hi\r\n");
        assert_eq!(b.subject(), Some("=?UTF-8?B?SGk=?="));
    }

    #[test]
    fn test_headers_in_order() {
        let mut b = builder();
        b.set_from("alice@example.com", "")
            .add_raw_header("X-Mailer", "mailforge")
            .add_cc("carol@example.com", "")
            .add_named_header("X-Custom", "dave@example.com", "");
        assert_eq!(
            b.headers(),
            [
                "From: alice@example.com",
                "X-Mailer: mailforge",
                "Cc: carol@example.com",
                "X-Custom: dave@example.com",
            ]
        );
    }

    #[test]
    fn test_raw_header_not_sanitized() {
        let mut b = builder();
        b.add_raw_header("Content-Type", "text/html; charset=\"utf-8\"");
        assert_eq!(b.headers(), ["Content-Type: text/html; charset=\"utf-8\""]);
    }

    #[test]
    fn test_set_wrap_zero_restores_default() {
        let mut b = builder();
        b.set_wrap(20);
        assert_eq!(b.wrap_column(), 20);
        b.set_wrap(0);
        assert_eq!(b.wrap_column(), 78);
    }

    #[test]
    fn test_plain_body_wrapped() {
        let mut b = builder();
        b.set_wrap(10).set_body("The quick brown fox");
        assert_eq!(b.render_plain_body(), format!("The quick{EOL}brown fox"));
        assert_eq!(b.render_plain_body(), b.render_plain_body());
    }

    #[test]
    fn test_plain_body_empty() {
        assert_eq!(builder().render_plain_body(), "");
    }

    #[test]
    fn test_body_dot_stuffed() {
        let mut b = builder();
        b.set_body("a\n.\nb");
        assert_eq!(b.body(), Some("a\n..\nb"));
        assert!(b.render_plain_body().contains("a\n..\nb"));
        assert!(b.render_multipart_body().contains("a\n..\nb"));
    }

    #[test]
    fn test_attachment_bytes() {
        let mut b = builder();
        b.add_attachment_bytes("hello.txt", b"Hello, World!");
        assert!(b.has_attachments());
        assert_eq!(b.attachments()[0].filename, "hello.txt");
        assert_eq!(b.attachments()[0].data, format!("SGVsbG8sIFdvcmxkIQ=={EOL}"));
    }

    #[test]
    fn test_attachment_name_cannot_break_part_headers() {
        let mut b = builder();
        b.add_attachment_bytes("evil\"\r\nX-Injected: 1.txt", b"A");
        assert_eq!(b.attachments()[0].filename, "evil'X-Injected: 1.txt");

        let body = b.render_multipart_body();
        assert!(body.contains("name=\"evil'X-Injected: 1.txt\""));
        assert!(body.contains("filename=\"evil'X-Injected: 1.txt\""));
        assert!(!body.lines().any(|line| line.starts_with("X-Injected")));
    }

    #[test]
    fn test_missing_attachment_errors() {
        let mut b = builder();
        let err = b
            .add_attachment("/nonexistent/mailforge/file.bin", None)
            .unwrap_err();
        assert!(matches!(err, Error::Attachment { .. }));
        assert!(!b.has_attachments());
    }

    #[test]
    fn test_multipart_body_layout() {
        let mut b = builder();
        b.set_body("<p>Hi</p>")
            .add_attachment_bytes("a.txt", b"A");
        let expected = [
            "This is a multi-part message in MIME format.",
            "--test-0000",
            "Content-Type: text/html; charset=\"utf-8\"",
            "Content-Transfer-Encoding: 7bit",
            "",
            "<p>Hi</p>",
            "",
            "--test-0000",
            "Content-Type: application/octet-stream; name=\"a.txt\"",
            "Content-Transfer-Encoding: base64",
            "Content-Disposition: attachment; filename=\"a.txt\"",
            "",
            "QQ==",
            "",
            "",
            "--test-0000",
        ]
        .join(EOL);
        assert_eq!(b.render_multipart_body(), expected);
    }

    #[test]
    fn test_multipart_body_closing_delimiter() {
        let config = ComposerConfig::builder().close_multipart(true).build().unwrap();
        let mut b = MessageBuilder::with_config(config)
            .unwrap()
            .with_boundary_source(SequentialBoundary::new("x"));
        b.add_attachment_bytes("a.txt", b"A");
        let body = b.render_multipart_body();
        assert!(body.ends_with(&format!("{EOL}--x0000--")));
        assert_eq!(body.matches("--x0000--").count(), 1);
    }

    #[test]
    fn test_mime_headers() {
        let b = builder();
        assert_eq!(
            b.render_mime_headers(),
            format!("MIME-Version: 1.0{EOL}Content-Type: multipart/mixed; boundary=\"test-0000\"")
        );
    }

    #[test]
    fn test_render_headers_appends_mime_only_with_attachments() {
        let mut b = builder();
        b.set_from("alice@example.com", "");
        assert_eq!(b.render_headers(), "From: alice@example.com");

        b.add_attachment_bytes("a.txt", b"A");
        assert_eq!(
            b.render_headers(),
            format!("From: alice@example.com{EOL}{}", b.render_mime_headers())
        );
    }

    #[test]
    fn test_render_headers_without_named_headers() {
        let mut b = builder();
        b.add_attachment_bytes("a.txt", b"A");
        assert_eq!(b.render_headers(), b.render_mime_headers());
    }

    #[test]
    fn test_reset() {
        let config = ComposerConfig::builder()
            .wrap_column(50)
            .extra_params("-fx@example.com")
            .build()
            .unwrap();
        let mut b = MessageBuilder::with_config(config)
            .unwrap()
            .with_boundary_source(SequentialBoundary::default());
        b.add_recipient("bob@example.com", "Bob")
            .set_subject("s")
            .set_body("b")
            .set_from("alice@example.com", "")
            .set_wrap(10)
            .set_extra_params("-fy@example.com")
            .add_attachment_bytes("a", b"a");

        let before = b.boundary().to_string();
        b.reset();

        assert!(b.recipients().is_empty());
        assert!(b.subject().is_none());
        assert!(b.body().is_none());
        assert!(b.headers().is_empty());
        assert!(!b.has_attachments());
        assert_eq!(b.wrap_column(), 50);
        assert_eq!(b.extra_params(), Some("-fx@example.com"));
        assert_ne!(b.boundary(), before);
        assert_eq!(b.boundary(), "b0001");
    }

    #[test]
    fn test_boundary_stable_without_reset() {
        let mut b = builder();
        let boundary = b.boundary().to_string();
        b.add_recipient("bob@example.com", "").set_body("x");
        let _ = b.render_multipart_body();
        assert_eq!(b.boundary(), boundary);
    }

    #[test]
    fn test_send_without_recipient() {
        let mut b = builder();
        b.set_subject("s").set_body("b");
        let mut transport = MemoryTransport::new();
        let err = b.send(&mut transport).unwrap_err();
        assert!(matches!(err, Error::NoRecipient));
        assert!(err.is_validation());
        assert!(transport.messages().is_empty());
    }

    #[test]
    fn test_send_with_only_empty_addresses() {
        let mut b = builder();
        b.add_recipient("<>\r\n", "").set_subject("s").set_body("b");
        assert_eq!(b.recipients(), [String::new()]);
        let mut transport = MemoryTransport::new();
        let err = b.send(&mut transport).unwrap_err();
        assert!(matches!(err, Error::NoRecipient));
        assert!(transport.messages().is_empty());
    }

    #[test]
    fn test_send_plain() {
        let mut b = builder();
        b.add_recipient("bob@example.com", "")
            .add_recipient("carol@example.com", "")
            .set_subject("Hi")
            .set_from("alice@example.com", "")
            .set_extra_params("-falice@example.com")
            .set_body("Hello");

        let mut transport = MemoryTransport::new();
        b.send(&mut transport).unwrap();

        let sent = transport.last().unwrap();
        assert_eq!(sent.to, "bob@example.com, carol@example.com");
        assert_eq!(sent.subject, "=?UTF-8?B?SGk=?=");
        assert_eq!(sent.body, "Hello");
        assert_eq!(sent.headers, "From: alice@example.com");
        assert_eq!(sent.extra_params.as_deref(), Some("-falice@example.com"));
    }

    #[test]
    fn test_send_without_subject() {
        let mut b = builder();
        b.add_recipient("bob@example.com", "");
        let mut transport = MemoryTransport::new();
        b.send(&mut transport).unwrap();
        assert_eq!(transport.last().unwrap().subject, "");
    }

    #[test]
    fn test_send_rejected() {
        let mut b = builder();
        b.add_recipient("bob@example.com", "");
        let mut transport = MemoryTransport::rejecting();
        assert!(matches!(b.send(&mut transport), Err(Error::Rejected)));
        assert_eq!(transport.messages().len(), 1);
    }

    #[test]
    fn test_send_through_trait_object() {
        let mut b = builder();
        b.add_recipient("bob@example.com", "");
        let mut transport: Box<dyn Transport> = Box::new(MemoryTransport::new());
        assert!(b.send(transport.as_mut()).is_ok());
    }

    #[test]
    fn test_snapshot() {
        let mut b = builder();
        b.add_recipient("bob@example.com", "")
            .set_body("x")
            .add_attachment_bytes("a.txt", b"A");
        let snapshot = b.snapshot();
        assert_eq!(snapshot.to, ["bob@example.com"]);
        assert_eq!(snapshot.body.as_deref(), Some("x"));
        assert_eq!(snapshot.attachments, ["a.txt"]);
        assert_eq!(snapshot.boundary, "test-0000");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["wrap_column"], 78);
        assert_eq!(json["subject"], serde_json::Value::Null);
    }
}
