//! Raw mode terminal handling.
//!
//! Enters and exits raw mode on Unix terminals using termios. Raw mode
//! disables line buffering and echo so the host can read input
//! character by character; the input field only needs to drop out of raw
//! mode around an external-editor launch and restore it afterwards, so the
//! state is an explicit toggle rather than a scope guard.
//!
//! # Safety
//! This module uses unsafe code for FFI calls to libc termios functions.
//! These are necessary for low-level terminal control and cannot be avoided.

#![allow(unsafe_code)]

#[cfg(unix)]
use std::io;
#[cfg(unix)]
use std::os::unix::io::{AsRawFd, RawFd};

/// Toggleable raw-mode state for one file descriptor.
///
/// Remembers the termios settings in effect when raw mode was entered so
/// they can be restored later. Dropping the value while raw restores the
/// saved settings.
#[cfg(unix)]
#[derive(Debug, Default)]
pub struct RawModeState {
    saved: Option<(RawFd, libc::termios)>,
}

#[cfg(unix)]
impl RawModeState {
    /// Create a new, not-raw state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether raw mode is currently active.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        self.saved.is_some()
    }

    /// Enter raw mode on `fd`. No-op if already raw.
    pub fn enable<F: AsRawFd>(&mut self, fd: &F) -> io::Result<()> {
        if self.saved.is_some() {
            return Ok(());
        }
        let fd = fd.as_raw_fd();
        let original = get_termios(fd)?;

        let mut raw = original;
        // Input modes: no break, no CR to NL, no parity check, no strip
        // char, no start/stop output control.
        raw.c_iflag &= !(libc::BRKINT | libc::ICRNL | libc::INPCK | libc::ISTRIP | libc::IXON);
        // Output modes: disable post processing.
        raw.c_oflag &= !libc::OPOST;
        // Control modes: 8 bit chars.
        raw.c_cflag |= libc::CS8;
        // Local modes: echo off, canonical off, no extended functions, no
        // signal chars.
        raw.c_lflag &= !(libc::ECHO | libc::ICANON | libc::IEXTEN | libc::ISIG);
        // Return reads after a 100ms timeout rather than blocking.
        raw.c_cc[libc::VMIN] = 0;
        raw.c_cc[libc::VTIME] = 1;

        set_termios(fd, &raw)?;
        self.saved = Some((fd, original));
        Ok(())
    }

    /// Leave raw mode, restoring the saved settings. No-op if not raw.
    pub fn restore(&mut self) -> io::Result<()> {
        match self.saved.take() {
            Some((fd, original)) => set_termios(fd, &original),
            None => Ok(()),
        }
    }
}

#[cfg(unix)]
impl Drop for RawModeState {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Check if the given file descriptor is a TTY.
#[cfg(unix)]
#[must_use]
pub fn is_tty<F: AsRawFd>(fd: &F) -> bool {
    // SAFETY: isatty is safe to call with any fd
    unsafe { libc::isatty(fd.as_raw_fd()) == 1 }
}

/// Get termios attributes.
#[cfg(unix)]
fn get_termios(fd: RawFd) -> io::Result<libc::termios> {
    let mut termios: libc::termios = unsafe { std::mem::zeroed() };

    // SAFETY: tcgetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcgetattr(fd, &mut termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(termios)
    }
}

/// Set termios attributes.
#[cfg(unix)]
fn set_termios(fd: RawFd, termios: &libc::termios) -> io::Result<()> {
    // SAFETY: tcsetattr is safe when passed a valid termios struct
    let result = unsafe { libc::tcsetattr(fd, libc::TCSAFLUSH, termios) };

    if result == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

/// Stub raw-mode state for non-Unix platforms: never raw, toggles are
/// no-ops.
#[cfg(not(unix))]
#[derive(Debug, Default)]
pub struct RawModeState;

#[cfg(not(unix))]
impl RawModeState {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn is_raw(&self) -> bool {
        false
    }
}

/// TTY detection is unavailable off-Unix.
#[cfg(not(unix))]
#[must_use]
pub fn is_tty<F>(_fd: &F) -> bool {
    false
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_is_tty() {
        // In CI/tests, stdin might not be a TTY
        let _ = is_tty(&io::stdin());
    }

    #[test]
    fn test_fresh_state_is_not_raw() {
        let state = RawModeState::new();
        assert!(!state.is_raw());
    }

    #[test]
    fn test_restore_without_enable_is_noop() {
        let mut state = RawModeState::new();
        assert!(state.restore().is_ok());
        assert!(!state.is_raw());
    }
}
