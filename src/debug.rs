//! Verbose-logging gate.
//!
//! Detailed per-keystroke logging is too noisy for normal operation, so it
//! is emitted only when `TEXTBUFFER_DEBUG` is set to `1` or `true` in the
//! environment. The check is done once per process.

use std::sync::OnceLock;

static VERBOSE: OnceLock<bool> = OnceLock::new();

/// Whether verbose buffer logging is enabled (`TEXTBUFFER_DEBUG=1|true`).
pub fn verbose() -> bool {
    *VERBOSE.get_or_init(|| {
        std::env::var("TEXTBUFFER_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
