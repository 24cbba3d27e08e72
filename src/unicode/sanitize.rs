//! Input sanitising for pasted or programmatic text.
//!
//! Terminal input can carry ANSI escape sequences and raw control bytes
//! that must never reach the buffer. [`strip_unsafe`] removes both; it
//! deliberately keeps `\n` and `\r` so the caller can normalise line
//! endings afterwards.

/// Recognition state for escape-sequence skipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EscState {
    /// Not inside an escape sequence.
    Ground,
    /// Saw ESC, waiting for the introducer byte.
    Escape,
    /// Inside a CSI sequence (`ESC [`), skipping until a final byte.
    Csi,
    /// Inside an OSC sequence (`ESC ]`), skipping until BEL or ST.
    Osc,
    /// Inside an OSC sequence, saw ESC of a potential ST terminator.
    OscEscape,
}

/// Remove ANSI escape sequences and unsafe control code points.
///
/// After escape removal, every code point `c` with `c == 0x7F` or
/// (`c <= 0x1F` and `c` not `\n`/`\r`) is dropped. Unterminated escape
/// sequences are consumed to the end of the input.
#[must_use]
pub fn strip_unsafe(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut state = EscState::Ground;

    for c in s.chars() {
        state = match state {
            EscState::Ground => {
                if c == '\u{1B}' {
                    EscState::Escape
                } else {
                    if c == '\n' || c == '\r' || (c > '\u{1F}' && c != '\u{7F}') {
                        out.push(c);
                    }
                    EscState::Ground
                }
            }
            EscState::Escape => match c {
                '[' => EscState::Csi,
                ']' => EscState::Osc,
                // Two-byte sequence: ESC plus one following byte.
                _ => EscState::Ground,
            },
            EscState::Csi => {
                // Parameter and intermediate bytes are 0x20-0x3F; a byte in
                // 0x40-0x7E terminates the sequence.
                if ('\u{40}'..='\u{7E}').contains(&c) {
                    EscState::Ground
                } else {
                    EscState::Csi
                }
            }
            EscState::Osc => match c {
                '\u{07}' => EscState::Ground,
                '\u{1B}' => EscState::OscEscape,
                _ => EscState::Osc,
            },
            EscState::OscEscape => {
                if c == '\\' {
                    EscState::Ground
                } else {
                    EscState::Osc
                }
            }
        };
    }

    out
}
