//! `textfield` - Interactive text buffer for terminal input fields
//!
//! textfield is the data structure and algorithm set behind a multi-line
//! terminal input: it stores logical lines of Unicode code points, keeps a
//! cursor and optional selection, wraps text to a viewport that understands
//! East-Asian wide characters, and funnels every edit through an undoable
//! engine. It does not render: you bring your own draw loop and key decoding,
//! textfield keeps the buffer correct.
//!
//! # Architecture At A Glance
//!
//! - `text`: Buffer state, edit engine, visual layout, and the controller
//! - `unicode`: Code-point indexing, display width, input sanitising
//! - `input`: Key event types consumed by the default mapping
//! - `terminal`: Raw-mode control for the external-editor round trip
//! - `host`: Capabilities the embedding application provides
//! - `external`: External-editor subprocess handling
//! - `error` / `debug`: Error types and the verbose-logging gate
//!
//! # Data Flow
//!
//! ```text
//! Key press or API call
//!     -> InputField translates to edit-engine actions
//!     -> BufferState applies them (snapshotting into undo history)
//!     -> VisualLayout rewraps lines for the viewport
//!     -> scroll snaps so the visual cursor stays in view
//! ```
//!
//! The engine is total: invalid ranges, empty clipboards, and edits at the
//! buffer's edges degrade to no-ops, never to panics or corrupt state.
//!
//! # Example
//!
//! ```
//! use textfield::{InputField, KeyEvent, NullHost, Viewport};
//!
//! let mut field = InputField::new(NullHost, Viewport::new(10, 3));
//! for c in "hello world".chars() {
//!     field.handle_input(KeyEvent::char(c));
//! }
//! // Wrapped at width 10, the space is consumed as the wrap delimiter.
//! assert_eq!(field.all_visual_lines(), &["hello", "world"]);
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::module_name_repetitions)] // KeyCode/KeyEvent etc read better qualified
#![allow(clippy::missing_errors_doc)] // Error behavior documented at the type
#![allow(clippy::must_use_candidate)] // Accessors are obviously pure
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod debug;
pub mod error;
pub mod external;
pub mod host;
pub mod input;
pub mod terminal;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use host::{Host, NullHost, TerminalHost};
pub use input::{KeyCode, KeyEvent, KeyModifiers};
pub use text::{
    Action, BufferState, Direction, InputField, Position, Snapshot, TextOp, Viewport,
    VisualLayout, VisualPosition, MAX_UNDO_DEPTH,
};

// Re-export terminal helpers
pub use terminal::{is_tty, RawModeState};
