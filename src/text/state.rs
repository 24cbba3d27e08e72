//! Buffer state: lines, cursor, selection, clipboard, and edit history.

use crate::text::position::Position;
use crate::unicode::cp_len;

/// Maximum number of undo snapshots retained. Oldest entries are dropped
/// when exceeded.
pub const MAX_UNDO_DEPTH: usize = 100;

/// A captured buffer state for undo/redo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor: Position,
}

/// Bounded undo/redo history of whole-buffer snapshots.
#[derive(Clone, Debug, Default)]
pub(crate) struct History {
    undo: Vec<Snapshot>,
    redo: Vec<Snapshot>,
}

impl History {
    /// Record a snapshot before a mutation. Clears the redo stack.
    fn record(&mut self, snapshot: Snapshot) {
        self.undo.push(snapshot);
        if self.undo.len() > MAX_UNDO_DEPTH {
            let excess = self.undo.len() - MAX_UNDO_DEPTH;
            self.undo.drain(..excess);
        }
        self.redo.clear();
    }

    /// Exchange the current state for the most recent undo snapshot.
    fn undo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.undo.pop()?;
        self.redo.push(current);
        Some(snapshot)
    }

    /// Exchange the current state for the most recent redo snapshot.
    fn redo(&mut self, current: Snapshot) -> Option<Snapshot> {
        let snapshot = self.redo.pop()?;
        self.undo.push(current);
        Some(snapshot)
    }

    fn undo_len(&self) -> usize {
        self.undo.len()
    }

    fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Discard the most recent undo snapshot without applying it.
    fn discard_last(&mut self) {
        self.undo.pop();
    }
}

/// The logical state of the text buffer.
///
/// Lines are stored as owned strings of code points; the vector is never
/// empty (an empty buffer is one empty line). All mutation goes through the
/// edit-engine methods in [`crate::text::action`], which snapshot state into
/// the bounded history before changing it.
#[derive(Clone, Debug)]
pub struct BufferState {
    pub(crate) lines: Vec<String>,
    pub(crate) cursor: Position,
    pub(crate) preferred_col: Option<usize>,
    pub(crate) selection_anchor: Option<Position>,
    pub(crate) clipboard: Option<String>,
    pub(crate) history: History,
}

impl Default for BufferState {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::origin(),
            preferred_col: None,
            selection_anchor: None,
            clipboard: None,
            history: History::default(),
        }
    }
}

impl BufferState {
    /// Create a buffer from initial text and a code-point cursor offset.
    ///
    /// Line endings are normalised to `\n`; the offset is clamped into the
    /// resulting text.
    #[must_use]
    pub fn new(initial_text: &str, initial_cursor_offset: usize) -> Self {
        let text = normalize_newlines(initial_text);
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let cursor = crate::text::position::offset_to_position(&text, initial_cursor_offset);
        Self {
            lines,
            cursor,
            ..Self::default()
        }
    }

    /// The buffer's lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The buffer's full text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// The logical cursor.
    #[must_use]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// The remembered visual column for vertical motion, if any.
    #[must_use]
    pub fn preferred_col(&self) -> Option<usize> {
        self.preferred_col
    }

    /// The selection anchor, if a selection is active.
    #[must_use]
    pub fn selection_anchor(&self) -> Option<Position> {
        self.selection_anchor
    }

    /// The active selection as an ordered `(start, end)` pair, or `None`
    /// when there is no anchor or the selection is empty.
    #[must_use]
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// The clipboard contents, if any.
    #[must_use]
    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    /// Code-point length of a line; zero for out-of-range rows.
    #[must_use]
    pub fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map_or(0, |l| cp_len(l))
    }

    /// Number of undo snapshots currently held.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    /// Number of redo snapshots currently held.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    /// Whether a position is valid in the current buffer.
    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        pos.row < self.lines.len() && pos.col <= self.line_len(pos.row)
    }

    /// Snapshot the current lines and cursor.
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            lines: self.lines.clone(),
            cursor: self.cursor,
        }
    }

    /// Record an undo snapshot and invalidate the selection.
    ///
    /// Called at the start of every mutating action: the snapshot captures
    /// the pre-edit state, the redo stack is cleared, and any active
    /// selection is dropped since the edit may change line structure.
    pub(crate) fn begin_mutation(&mut self) {
        self.history.record(self.snapshot());
        self.selection_anchor = None;
    }

    /// Roll back the snapshot taken by the most recent `begin_mutation`.
    ///
    /// Used when a provisional mutation (the external-editor round trip)
    /// turns out not to change anything.
    pub(crate) fn cancel_mutation(&mut self) {
        self.history.discard_last();
    }

    /// Restore lines and cursor from the most recent undo snapshot.
    pub fn pop_undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Restore lines and cursor from the most recent redo snapshot.
    pub fn pop_redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(snapshot) => {
                self.restore(snapshot);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.lines = snapshot.lines;
        self.cursor = snapshot.cursor;
        self.preferred_col = None;
        self.selection_anchor = None;
    }

    /// Clamp the cursor into the current buffer.
    pub(crate) fn clamp_cursor(&mut self) {
        self.cursor.row = self.cursor.row.min(self.lines.len().saturating_sub(1));
        self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.row));
    }
}

/// Normalise `\r\n` and lone `\r` to `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
