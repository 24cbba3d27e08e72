//! Unicode utilities: code-point indexing, display width, input sanitising.

mod codepoint;
mod sanitize;
mod width;

pub use codepoint::{code_points, cp_len, cp_slice, cp_slice_from};
pub use sanitize::strip_unsafe;
pub use width::{char_width, is_wide, is_zero_width, visual_width};
