//! Code-point indexing helpers.
//!
//! Cursor columns, offsets, and string lengths throughout this crate are
//! counted in Unicode code points, never in bytes or UTF-16 units. These
//! helpers keep that arithmetic in one place.

/// Iterate over the code points of a string.
pub fn code_points(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars()
}

/// Number of code points in a string.
#[must_use]
pub fn cp_len(s: &str) -> usize {
    s.chars().count()
}

/// Substring by code-point indices, clamped to `[0, cp_len(s)]`.
///
/// Returns the code points in `[start, end)`. An inverted range yields the
/// empty string.
#[must_use]
pub fn cp_slice(s: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    s.chars().skip(start).take(end - start).collect()
}

/// Substring from a code-point index to the end of the string.
#[must_use]
pub fn cp_slice_from(s: &str, start: usize) -> String {
    s.chars().skip(start).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cp_len_ascii() {
        assert_eq!(cp_len("hello"), 5);
        assert_eq!(cp_len(""), 0);
    }

    #[test]
    fn test_cp_len_multibyte() {
        // 3 code points, 9 bytes
        assert_eq!(cp_len("日本語"), 3);
        // Combining acute is its own code point
        assert_eq!(cp_len("e\u{0301}"), 2);
    }

    #[test]
    fn test_cp_slice() {
        assert_eq!(cp_slice("hello", 1, 3), "el");
        assert_eq!(cp_slice("日本語", 1, 2), "本");
        assert_eq!(cp_slice_from("日本語", 1), "本語");
    }

    #[test]
    fn test_cp_slice_clamps() {
        assert_eq!(cp_slice("abc", 1, 99), "bc");
        assert_eq!(cp_slice("abc", 99, 100), "");
        assert_eq!(cp_slice("abc", 2, 1), "");
        assert_eq!(cp_slice_from("abc", 99), "");
    }

    #[test]
    fn test_code_points_iterates_scalars() {
        let cps: Vec<char> = code_points("a语b").collect();
        assert_eq!(cps, vec!['a', '语', 'b']);
    }
}
