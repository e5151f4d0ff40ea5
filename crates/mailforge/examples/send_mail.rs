#![allow(clippy::uninlined_format_args)]
//! Example: compose a message and hand it to the local sendmail
//!
//! ## Running
//!
//! ```bash
//! export MAIL_TO="you@example.com"
//! cargo run --package mailforge --example send_mail
//! ```
//!
//! Set `MAIL_DRY_RUN=1` to print the rendered message instead of invoking
//! sendmail, and `MAIL_ATTACHMENT=/path/to/file` to attach a file.

use std::env;

use mailforge::{MessageBuilder, OutgoingMail, SendmailTransport, Transport};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mailforge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let to = env::var("MAIL_TO").unwrap_or_else(|_| "recipient@example.com".to_string());

    let mut message = MessageBuilder::new();
    message
        .add_recipient(&to, "Recipient 1")
        .set_subject("Test Message")
        .set_from("bot@example.com", "Mail Bot")
        .add_named_header("Reply-To", "sender@example.com", "Mail Bot")
        .add_named_header("Cc", "bill@example.com", "Bill Gates")
        .add_named_header("Bcc", "steve@example.com", "Steve Jobs")
        .add_raw_header("X-Mailer", concat!("mailforge/", env!("CARGO_PKG_VERSION")))
        .set_body("<strong>This is a test message.</strong>");

    if let Ok(path) = env::var("MAIL_ATTACHMENT") {
        message.add_attachment(&path, None)?;
    } else {
        message.add_raw_header("Content-Type", "text/html; charset=\"utf-8\"");
    }

    let mut transport: Box<dyn Transport> = if env::var_os("MAIL_DRY_RUN").is_some() {
        Box::new(|mail: &OutgoingMail<'_>| {
            println!("{}", mail.to_message());
            true
        })
    } else {
        Box::new(SendmailTransport::new())
    };

    match message.send(transport.as_mut()) {
        Ok(()) => println!("Email was sent successfully!"),
        Err(e) => println!("An error occurred. We could not send email: {}", e),
    }

    Ok(())
}
