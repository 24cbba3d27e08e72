//! Terminal raw-mode control.

mod raw;

pub use raw::{is_tty, RawModeState};
