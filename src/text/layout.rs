//! Visual layout: word wrapping and the logical/visual maps.
//!
//! The layout is a pure function of `(lines, cursor, viewport width)` and is
//! recomputed whenever any of the three change. Nothing here mutates buffer
//! state; the controller caches the result alongside the state it was
//! derived from.

use crate::text::position::Position;
use crate::unicode::{char_width, cp_len};

/// A position in the wrapped (visual) view.
///
/// `row` indexes visual lines, `col` indexes code points within the visual
/// line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisualPosition {
    pub row: usize,
    pub col: usize,
}

impl VisualPosition {
    /// Create a new visual position.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// The wrapped view of a buffer against a viewport width.
#[derive(Clone, Debug, Default)]
pub struct VisualLayout {
    visual_lines: Vec<String>,
    visual_cursor: VisualPosition,
    /// Per logical row: `(visual_row, chunk_start_col)` for each chunk.
    logical_to_visual: Vec<Vec<(usize, usize)>>,
    /// Per visual row: `(logical_row, chunk_start_col)`.
    visual_to_logical: Vec<(usize, usize)>,
}

impl VisualLayout {
    /// Compute the layout for `lines` and `cursor` at `width` cells.
    ///
    /// `width` is clamped to at least one cell.
    #[must_use]
    pub fn compute(lines: &[String], cursor: Position, width: usize) -> Self {
        let width = width.max(1);
        let mut visual_lines = Vec::new();
        let mut logical_to_visual = Vec::with_capacity(lines.len());
        let mut visual_to_logical = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            let mut chunk_map = Vec::new();
            for (start_col, content) in wrap_line(line, width) {
                chunk_map.push((visual_lines.len(), start_col));
                visual_to_logical.push((row, start_col));
                visual_lines.push(content);
            }
            logical_to_visual.push(chunk_map);
        }

        let visual_cursor = place_cursor(&visual_lines, &logical_to_visual, cursor);
        Self {
            visual_lines,
            visual_cursor,
            logical_to_visual,
            visual_to_logical,
        }
    }

    /// All wrapped visual lines.
    #[must_use]
    pub fn visual_lines(&self) -> &[String] {
        &self.visual_lines
    }

    /// Number of visual lines (always at least one).
    #[must_use]
    pub fn visual_line_count(&self) -> usize {
        self.visual_lines.len()
    }

    /// The cursor in visual coordinates.
    #[must_use]
    pub fn visual_cursor(&self) -> VisualPosition {
        self.visual_cursor
    }

    /// Code-point length of a visual line.
    #[must_use]
    pub fn visual_line_len(&self, visual_row: usize) -> usize {
        self.visual_lines.get(visual_row).map_or(0, |l| cp_len(l))
    }

    /// The `(logical_row, chunk_start_col)` a visual row came from.
    #[must_use]
    pub fn logical_origin(&self, visual_row: usize) -> Option<(usize, usize)> {
        self.visual_to_logical.get(visual_row).copied()
    }

    /// The chunks of a logical row as `(visual_row, chunk_start_col)` pairs.
    #[must_use]
    pub fn chunks_of(&self, logical_row: usize) -> &[(usize, usize)] {
        self.logical_to_visual
            .get(logical_row)
            .map_or(&[], Vec::as_slice)
    }

    /// Map a visual position back to a logical one.
    ///
    /// The visual column is clamped to the visual line's length.
    #[must_use]
    pub fn to_logical(&self, visual: VisualPosition) -> Position {
        match self.logical_origin(visual.row) {
            Some((row, start_col)) => {
                let col = visual.col.min(self.visual_line_len(visual.row));
                Position::new(row, start_col + col)
            }
            None => Position::origin(),
        }
    }
}

/// Wrap one logical line into `(chunk_start_col, content)` chunks.
///
/// Accumulates code points while the running visual width stays within
/// `width`. On overflow the chunk breaks at the last space seen inside it
/// (consuming exactly one space as the wrap delimiter), or hard-breaks when
/// there is none. A single code point wider than the viewport is emitted as
/// its own visual line rather than looping. An empty line yields exactly
/// one empty chunk.
fn wrap_line(line: &str, width: usize) -> Vec<(usize, String)> {
    let cps: Vec<char> = line.chars().collect();
    let mut chunks = Vec::new();

    let mut start = 0; // first code point of the current chunk
    let mut i = 0; // next code point to place
    let mut w = 0; // visual width of the current chunk
    let mut last_space: Option<usize> = None;

    while i < cps.len() {
        let cw = char_width(cps[i]);
        if w + cw > width {
            if i == start {
                // Lone code point wider than the viewport: overflow it.
                chunks.push((start, cps[i].to_string()));
                start = i + 1;
            } else if let Some(sp) = last_space.filter(|&sp| sp > start) {
                chunks.push((start, cps[start..sp].iter().collect()));
                // The space itself is the wrap delimiter and is skipped.
                start = sp + 1;
            } else {
                chunks.push((start, cps[start..i].iter().collect()));
                start = i;
            }
            i = start;
            w = 0;
            last_space = None;
            continue;
        }
        if cps[i] == ' ' {
            last_space = Some(i);
        }
        w += cw;
        i += 1;
    }

    if start < cps.len() || chunks.is_empty() {
        chunks.push((start, cps[start..].iter().collect()));
    }
    chunks
}

/// Place the logical cursor on a visual row.
///
/// The cursor belongs to the first chunk whose span `[start, start + len]`
/// contains its column; a cursor exactly at the end of a non-final chunk
/// therefore stays at that chunk's trailing end rather than jumping to the
/// head of the next, which keeps `end` stable on wrapped lines.
fn place_cursor(
    visual_lines: &[String],
    logical_to_visual: &[Vec<(usize, usize)>],
    cursor: Position,
) -> VisualPosition {
    let Some(chunks) = logical_to_visual.get(cursor.row) else {
        return VisualPosition::default();
    };

    let mut placed = VisualPosition::default();
    for &(visual_row, start_col) in chunks {
        let len = visual_lines.get(visual_row).map_or(0, |l| cp_len(l));
        if cursor.col <= start_col + len {
            return VisualPosition::new(visual_row, cursor.col.saturating_sub(start_col));
        }
        placed = VisualPosition::new(visual_row, len);
    }
    placed
}
