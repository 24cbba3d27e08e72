//! Key event types consumed by the input field.

mod key;

pub use key::{KeyCode, KeyEvent, KeyModifiers};
