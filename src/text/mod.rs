//! The text buffer core: state, edit engine, layout, and controller.
//!
//! Key types:
//!
//! - [`BufferState`]: lines, cursor, selection, clipboard, bounded history
//! - [`Action`] / [`TextOp`]: the closed edit-engine action set
//! - [`VisualLayout`]: the wrapped view and its logical/visual maps
//! - [`InputField`]: the controller tying state, layout, and host together
//!
//! # Examples
//!
//! ```
//! use textfield::{InputField, NullHost, Viewport};
//!
//! let mut field = InputField::new(NullHost, Viewport::new(40, 5));
//! field.insert("hello world");
//! field.delete_word_left();
//! assert_eq!(field.text(), "hello ");
//!
//! field.undo();
//! assert_eq!(field.text(), "hello world");
//! ```

mod action;
mod field;
mod layout;
mod position;
mod state;

pub use action::{Action, Direction, TextOp};
pub use field::{InputField, Viewport};
pub use layout::{VisualLayout, VisualPosition};
pub use position::{offset_to_position, position_to_offset, Position};
pub use state::{normalize_newlines, BufferState, Snapshot, MAX_UNDO_DEPTH};
