use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use super::Printer;
use crate::error::ExportError;
use crate::render::RenderedResume;

/// Pipes the text rendition into a print command such as `lp`.
#[derive(Debug, Clone)]
pub struct SystemPrinter {
    command: String,
}

impl Default for SystemPrinter {
    fn default() -> Self {
        Self::new("lp")
    }
}

impl SystemPrinter {
    /// `command` is split on whitespace; the first word is the program.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn failure(&self, message: impl Into<String>) -> ExportError {
        ExportError::Print {
            command: self.command.clone(),
            message: message.into(),
        }
    }
}

impl Printer for SystemPrinter {
    fn print(&self, rendered: &RenderedResume) -> Result<(), ExportError> {
        let mut words = self.command.split_whitespace();
        let Some(program) = words.next() else {
            return Err(self.failure("no print command configured"));
        };

        debug!(command = %self.command, "spawning print command");
        let mut child = Command::new(program)
            .args(words)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take()
            && let Err(err) = stdin.write_all(rendered.to_text().as_bytes())
            && err.kind() != ErrorKind::BrokenPipe
        {
            return Err(err.into());
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("exited with {}", output.status),
                text => text.to_string(),
            };
            return Err(self.failure(message));
        }

        info!(
            command = %self.command,
            output = %String::from_utf8_lossy(&output.stdout).trim(),
            "sent to printer"
        );
        Ok(())
    }
}
