//! Host capabilities supplied by the surrounding application.
//!
//! The buffer core never talks to the terminal, filesystem paths, or the
//! application's event loop directly; everything it needs from outside is
//! bundled into one capability object handed to the controller.

use std::io;

#[cfg(unix)]
use crate::terminal::is_tty;
use crate::terminal::RawModeState;

/// Capabilities the surrounding application provides to an input field.
///
/// Every method has a conservative default, so hosts implement only what
/// they care about: a path predicate for drag-drop inference, raw-mode
/// control around external-editor launches, and a change sink.
pub trait Host {
    /// Whether `candidate` names a path worth `@`-referencing when text is
    /// dropped onto the field. Used only by drag-drop inference.
    fn is_valid_path(&self, candidate: &str) -> bool {
        let _ = candidate;
        false
    }

    /// Undo shell escaping on a dropped path before validation.
    fn unescape_path(&self, raw: &str) -> String {
        raw.to_string()
    }

    /// Whether the host terminal is currently in raw mode.
    fn is_raw(&self) -> bool {
        false
    }

    /// Toggle terminal raw mode. Used only around external-editor launch.
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        let _ = enabled;
        Ok(())
    }

    /// Called with the full text after every change to it.
    fn on_change(&mut self, text: &str) {
        let _ = text;
    }
}

/// A host with no capabilities: useful for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl Host for NullHost {}

/// A host that controls raw mode on stdin via termios.
///
/// Path inference and change notification keep their defaults; embedders
/// who need those implement [`Host`] themselves.
#[derive(Debug, Default)]
pub struct TerminalHost {
    raw: RawModeState,
}

impl TerminalHost {
    /// Create a terminal host; raw mode starts disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for TerminalHost {
    fn is_raw(&self) -> bool {
        self.raw.is_raw()
    }

    #[cfg(unix)]
    fn set_raw_mode(&mut self, enabled: bool) -> io::Result<()> {
        if enabled {
            if !is_tty(&io::stdin()) {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    "stdin is not a terminal",
                ));
            }
            self.raw.enable(&io::stdin())
        } else {
            self.raw.restore()
        }
    }

    #[cfg(not(unix))]
    fn set_raw_mode(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}
