//! Error types for textfield.

use std::fmt;
use std::io;

/// Result type alias for textfield operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for textfield operations.
///
/// The edit engine itself is total: invalid inputs degrade to no-ops rather
/// than errors. These variants exist for the external-editor path, where
/// real I/O can fail; they are logged and never abort the buffer.
#[derive(Debug)]
pub enum Error {
    /// I/O error from temp-file or subprocess handling.
    Io(io::Error),
    /// The external editor could not be launched.
    EditorLaunch { editor: String, source: io::Error },
    /// The external editor exited unsuccessfully.
    EditorExit { editor: String, code: Option<i32> },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::EditorLaunch { editor, source } => {
                write!(f, "failed to launch editor {editor:?}: {source}")
            }
            Self::EditorExit { editor, code } => match code {
                Some(code) => write!(f, "editor {editor:?} exited with status {code}"),
                None => write!(f, "editor {editor:?} was terminated by a signal"),
            },
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::EditorLaunch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
