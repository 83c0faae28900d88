//! Copy to the system clipboard through the terminal
//!
//! Uses OSC 52, which most modern terminals understand and which also works
//! over SSH. Inside tmux or GNU screen the sequence is wrapped in a DCS
//! passthrough so it reaches the outer terminal.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Write;
use thiserror::Error;

/// Common OSC 52 limit on the base64 payload
pub const MAX_OSC52_PAYLOAD: usize = 74_994;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Nothing to copy")]
    Empty,

    #[error("Text too large for the terminal clipboard ({encoded} bytes encoded, limit {limit})")]
    TooLarge { encoded: usize, limit: usize },

    #[error("Failed to write to terminal: {0}")]
    Write(#[from] std::io::Error),
}

/// How the sequence must be wrapped to reach the real terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Passthrough {
    #[default]
    None,
    /// `ESC P tmux; <ESC-doubled seq> ESC \`
    Tmux,
    /// `ESC P <seq> ESC \`
    Screen,
}

impl Passthrough {
    /// Detect a multiplexer from the environment
    pub fn detect() -> Self {
        Self::from_vars(
            std::env::var_os("TMUX").is_some(),
            std::env::var_os("STY").is_some(),
            std::env::var("TERM").unwrap_or_default().as_str(),
        )
    }

    fn from_vars(tmux: bool, sty: bool, term: &str) -> Self {
        if tmux || term.starts_with("tmux") {
            Passthrough::Tmux
        } else if sty || term.starts_with("screen") {
            Passthrough::Screen
        } else {
            Passthrough::None
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Clipboard {
    passthrough: Passthrough,
    max_payload: usize,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new(Passthrough::None)
    }
}

impl Clipboard {
    pub fn new(passthrough: Passthrough) -> Self {
        Self {
            passthrough,
            max_payload: MAX_OSC52_PAYLOAD,
        }
    }

    /// Clipboard configured for the current terminal session
    pub fn from_env() -> Self {
        let passthrough = Passthrough::detect();
        tracing::debug!("Clipboard passthrough: {:?}", passthrough);
        Self::new(passthrough)
    }

    /// Build the escape sequence that sets the clipboard to `text`
    pub fn sequence(&self, text: &str) -> Result<Vec<u8>, ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }

        let encoded = STANDARD.encode(text.as_bytes());
        if encoded.len() > self.max_payload {
            return Err(ClipboardError::TooLarge {
                encoded: encoded.len(),
                limit: self.max_payload,
            });
        }

        let osc = format!("\x1b]52;c;{}\x07", encoded);
        let bytes = match self.passthrough {
            Passthrough::None => osc.into_bytes(),
            Passthrough::Tmux => {
                let mut out = b"\x1bPtmux;".to_vec();
                for byte in osc.bytes() {
                    if byte == 0x1b {
                        out.extend_from_slice(b"\x1b\x1b");
                    } else {
                        out.push(byte);
                    }
                }
                out.extend_from_slice(b"\x1b\\");
                out
            }
            Passthrough::Screen => {
                let mut out = b"\x1bP".to_vec();
                out.extend_from_slice(osc.as_bytes());
                out.extend_from_slice(b"\x1b\\");
                out
            }
        };
        Ok(bytes)
    }

    /// Write the clipboard sequence to `writer`
    pub fn copy_to<W: Write>(&self, text: &str, writer: &mut W) -> Result<(), ClipboardError> {
        let sequence = self.sequence(text)?;
        writer.write_all(&sequence)?;
        writer.flush()?;
        Ok(())
    }

    /// Copy through the controlling terminal
    pub fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout();
        self.copy_to(text, &mut stdout)?;
        tracing::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}
