//! Terminal Clipboard Backends
//!
//! Two ways of getting text onto the user's clipboard from a terminal:
//!
//! - [`SystemClipboard`] pipes the text into the platform copy tool
//!   (`pbcopy`, `wl-copy`, `xclip`, `xsel` or `clip`)
//! - [`Osc52Clipboard`] writes an OSC 52 escape sequence, which most modern
//!   terminal emulators turn into a clipboard write (also over SSH)
//!
//! The system tool is the primary backend and OSC 52 the fallback.

use std::io::IsTerminal;
use std::process::Stdio;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use wheel_core::{ClipboardBackend, ClipboardError};

/// One copy command and its arguments
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyCommand {
    /// Executable name, looked up on `PATH`
    pub program: &'static str,
    /// Arguments that make it read the clipboard text from stdin
    pub args: &'static [&'static str],
}

impl CopyCommand {
    const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

/// Copies through the platform's clipboard tool
#[derive(Clone, Debug)]
pub struct SystemClipboard {
    candidates: Vec<CopyCommand>,
}

impl SystemClipboard {
    /// Candidates for the current platform, most specific first
    pub fn detect() -> Self {
        let mut candidates = Vec::new();

        if cfg!(target_os = "macos") {
            candidates.push(CopyCommand::new("pbcopy", &[]));
        } else if cfg!(windows) {
            candidates.push(CopyCommand::new("clip", &[]));
        } else {
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                candidates.push(CopyCommand::new("wl-copy", &[]));
            }
            candidates.push(CopyCommand::new("xclip", &["-selection", "clipboard"]));
            candidates.push(CopyCommand::new("xsel", &["--clipboard", "--input"]));
        }

        Self { candidates }
    }

    /// Use an explicit list of commands
    pub fn with_commands(candidates: Vec<CopyCommand>) -> Self {
        Self { candidates }
    }

    /// Commands tried, in order
    pub fn candidates(&self) -> &[CopyCommand] {
        &self.candidates
    }

    async fn run(command: &CopyCommand, text: &str) -> Result<(), ClipboardError> {
        let mut child = Command::new(command.program)
            .args(command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            // Dropping stdin closes the pipe so the tool sees EOF
        }

        let status = child.wait().await?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::WriteFailed(format!(
                "{} exited with {status}",
                command.program
            )))
        }
    }
}

#[async_trait]
impl ClipboardBackend for SystemClipboard {
    fn name(&self) -> &str {
        "system"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut last_error = None;

        for command in &self.candidates {
            match Self::run(command, text).await {
                Ok(()) => {
                    tracing::debug!(program = command.program, "Clipboard write succeeded");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(program = command.program, error = %e, "Clipboard tool failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ClipboardError::Unavailable("no clipboard tool for this platform".to_string())
        }))
    }
}

/// Copies by asking the terminal emulator through OSC 52
#[derive(Clone, Copy, Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    /// The escape sequence that sets the clipboard to `text`
    pub fn sequence(text: &str) -> String {
        format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
    }
}

#[async_trait]
impl ClipboardBackend for Osc52Clipboard {
    fn name(&self) -> &str {
        "osc52"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !std::io::stdout().is_terminal() {
            return Err(ClipboardError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }

        let mut stdout = tokio::io::stdout();
        stdout.write_all(Self::sequence(text).as_bytes()).await?;
        stdout.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(Osc52Clipboard::sequence("hi"), "\x1b]52;c;aGk=\x07");
    }

    #[test]
    fn test_detect_has_candidates() {
        assert!(!SystemClipboard::detect().candidates().is_empty());
    }

    #[tokio::test]
    async fn test_no_commands_is_unavailable() {
        let clipboard = SystemClipboard::with_commands(Vec::new());
        let err = clipboard.write_text("x").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_program_is_io_error() {
        let clipboard = SystemClipboard::with_commands(vec![CopyCommand::new(
            "breakfast-wheel-no-such-copy-tool",
            &[],
        )]);
        let err = clipboard.write_text("x").await.unwrap_err();
        assert!(matches!(err, ClipboardError::Io(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_reads_stdin() {
        let clipboard = SystemClipboard::with_commands(vec![CopyCommand::new("cat", &[])]);
        clipboard.write_text("pancakes").await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_falls_through_to_next_command() {
        let clipboard = SystemClipboard::with_commands(vec![
            CopyCommand::new("false", &[]),
            CopyCommand::new("cat", &[]),
        ]);
        clipboard.write_text("waffles").await.unwrap();
    }
}
