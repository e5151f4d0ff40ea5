//! Transport that pipes messages into a local sendmail-compatible program.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

use super::{OutgoingMail, Transport};

/// Default location of the sendmail binary.
const DEFAULT_PROGRAM: &str = "/usr/sbin/sendmail";

/// Transport backed by a sendmail-compatible binary.
///
/// The program is started with its base arguments (`-t -i` by default,
/// reading recipients from the headers and ignoring lone dots) followed by
/// the message's extra parameters split on whitespace. The rendered message
/// is written to its standard input.
#[derive(Debug, Clone)]
pub struct SendmailTransport {
    program: PathBuf,
    args: Vec<String>,
}

impl Default for SendmailTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SendmailTransport {
    /// Creates a transport using `/usr/sbin/sendmail -t -i`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Creates a transport using a custom program with the default arguments.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: vec!["-t".to_string(), "-i".to_string()],
        }
    }

    /// Replaces the base arguments passed before the extra parameters.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn run(&self, mail: &OutgoingMail<'_>) -> io::Result<bool> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(params) = mail.extra_params {
            command.args(params.split_whitespace());
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        // Stdin is fed from its own thread so a child filling its stderr
        // pipe before reading input cannot stall us.
        let writer = child.stdin.take().map(|mut stdin| {
            let message = mail.to_message();
            thread::spawn(move || stdin.write_all(message.as_bytes()))
        });

        let output = child.wait_with_output()?;
        if let Some(writer) = writer {
            writer
                .join()
                .map_err(|_| io::Error::other("stdin writer thread panicked"))??;
        }

        if !output.status.success() {
            warn!(
                program = %self.program.display(),
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "sendmail exited with failure"
            );
        }

        Ok(output.status.success())
    }
}

impl Transport for SendmailTransport {
    fn deliver(&mut self, mail: &OutgoingMail<'_>) -> bool {
        debug!(program = %self.program.display(), to = mail.to, "Piping message to sendmail");
        match self.run(mail) {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(?e, program = %self.program.display(), "Failed to run sendmail");
                false
            }
        }
    }
}
