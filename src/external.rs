//! External-editor round trip.
//!
//! The buffer's text is written to a file in a fresh temp directory, a
//! synchronous editor subprocess is run on it with inherited stdio, and the
//! edited contents are read back. The temp directory is removed on every
//! exit path, including errors.

use std::env;
use std::fs;
use std::process::Command;

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::text::normalize_newlines;

/// File name the buffer contents are edited under.
const BUFFER_FILE: &str = "buffer.txt";

/// Resolve which editor command to launch.
///
/// Precedence: the explicit choice, then `$VISUAL`, then `$EDITOR`, then
/// the platform fallback (`notepad` on Windows, `vi` elsewhere). Blank
/// values are skipped.
#[must_use]
pub fn resolve_editor(explicit: Option<&str>) -> String {
    if let Some(editor) = explicit {
        if !editor.trim().is_empty() {
            return editor.to_string();
        }
    }
    for var in ["VISUAL", "EDITOR"] {
        if let Ok(value) = env::var(var) {
            if !value.trim().is_empty() {
                return value;
            }
        }
    }
    if cfg!(windows) { "notepad" } else { "vi" }.to_string()
}

/// Run `editor` on `text` and return the edited contents, newlines
/// normalised to `\n`.
///
/// The editor value is split on whitespace so `$EDITOR` settings like
/// `"code --wait"` work. Fails without touching the caller's state when
/// the editor cannot be launched or exits unsuccessfully.
pub fn edit_text(text: &str, editor: &str) -> Result<String> {
    let dir = TempDir::new()?;
    let path = dir.path().join(BUFFER_FILE);
    fs::write(&path, text)?;

    let mut words = editor.split_whitespace();
    let program = words.next().ok_or_else(|| Error::EditorLaunch {
        editor: editor.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty editor command"),
    })?;

    let status = Command::new(program)
        .args(words)
        .arg(&path)
        .status()
        .map_err(|source| Error::EditorLaunch {
            editor: editor.to_string(),
            source,
        })?;

    if !status.success() {
        return Err(Error::EditorExit {
            editor: editor.to_string(),
            code: status.code(),
        });
    }

    let edited = fs::read_to_string(&path)?;
    Ok(normalize_newlines(&edited))
}
