//! The edit engine: a closed action set applied to [`BufferState`].
//!
//! Every mutating action snapshots the pre-edit state into the undo history
//! (clearing redo) before changing anything; trivially empty actions such
//! as backspace at the origin or paste with an empty clipboard return the
//! state untouched instead. Movement, copy, and selection start never touch
//! the history.

use crate::debug;
use crate::text::layout::{VisualLayout, VisualPosition};
use crate::text::position::{offset_to_position, Position};
use crate::text::state::{normalize_newlines, BufferState};
use crate::unicode::{cp_len, cp_slice, cp_slice_from, strip_unsafe};

/// One element of an [`Action::ApplyOperations`] batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextOp {
    /// Insert a string at the cursor.
    Insert(String),
    /// Delete one code point to the left of the cursor.
    Backspace,
}

/// Cursor movement direction, interpreted in the wrapped view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// The closed set of edit-engine actions.
#[derive(Clone, Debug)]
pub enum Action {
    /// Replace the whole text, cursor to the end.
    SetText { text: String, push_undo: bool },
    /// Apply an ordered insert/backspace batch as one undo step.
    ApplyOperations(Vec<TextOp>),
    /// Forward-delete one code point, joining lines at line end.
    Delete,
    /// Delete the word (or line join) to the left of the cursor.
    DeleteWordLeft,
    /// Delete the word (or line join) to the right of the cursor.
    DeleteWordRight,
    /// Delete from the cursor to the end of the line.
    KillLineRight,
    /// Delete from the start of the line to the cursor.
    KillLineLeft,
    /// Move the cursor in the wrapped view.
    Move(Direction),
    /// Move the cursor to a code-point offset in the current text.
    MoveToOffset(usize),
    /// Replace a validated logical range with new text.
    ReplaceRange {
        start: Position,
        end: Position,
        text: String,
    },
    /// Restore the previous snapshot.
    Undo,
    /// Restore the previously undone snapshot.
    Redo,
    /// Copy the selection to the internal clipboard.
    Copy,
    /// Insert the internal clipboard at the cursor.
    Paste,
    /// Anchor a selection at the cursor.
    StartSelection,
}

/// Characters that end a word for word-wise deletion.
fn is_word_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, ',' | '.' | ';' | '!' | '?')
}

/// Expand insert payloads containing `0x7F` into explicit backspaces.
///
/// `Insert("a\x7Fb")` becomes `[Insert("a"), Backspace, Insert("b")]`, so a
/// terminal's DEL bytes embedded in a paste behave as deletions while the
/// whole batch stays one undo step.
fn expand_ops(ops: &[TextOp]) -> Vec<TextOp> {
    let mut expanded = Vec::with_capacity(ops.len());
    for op in ops {
        match op {
            TextOp::Backspace => expanded.push(TextOp::Backspace),
            TextOp::Insert(payload) => {
                let mut segment = String::new();
                for c in payload.chars() {
                    if c == '\u{7F}' {
                        if !segment.is_empty() {
                            expanded.push(TextOp::Insert(std::mem::take(&mut segment)));
                        }
                        expanded.push(TextOp::Backspace);
                    } else {
                        segment.push(c);
                    }
                }
                if !segment.is_empty() {
                    expanded.push(TextOp::Insert(segment));
                }
            }
        }
    }
    expanded
}

impl BufferState {
    /// Apply one action. The `layout` must be derived from the current
    /// state; only [`Action::Move`] consults it.
    ///
    /// Returns the action's own outcome: `false` for a rejected range, an
    /// empty undo/redo stack, an empty clipboard, or a copy without a
    /// selection; `true` otherwise.
    pub fn apply(&mut self, action: Action, layout: &VisualLayout) -> bool {
        if debug::verbose() {
            tracing::debug!(?action, cursor = ?self.cursor(), "apply");
        }
        match action {
            Action::SetText { text, push_undo } => {
                self.set_text(&text, push_undo);
                true
            }
            Action::ApplyOperations(ops) => {
                self.apply_operations(&ops);
                true
            }
            Action::Delete => {
                self.delete();
                true
            }
            Action::DeleteWordLeft => {
                self.delete_word_left();
                true
            }
            Action::DeleteWordRight => {
                self.delete_word_right();
                true
            }
            Action::KillLineRight => {
                self.kill_line_right();
                true
            }
            Action::KillLineLeft => {
                self.kill_line_left();
                true
            }
            Action::Move(dir) => {
                self.move_cursor(dir, layout);
                true
            }
            Action::MoveToOffset(offset) => {
                self.move_to_offset(offset);
                true
            }
            Action::ReplaceRange { start, end, text } => self.replace_range(start, end, &text),
            Action::Undo => self.pop_undo(),
            Action::Redo => self.pop_redo(),
            Action::Copy => self.copy().is_some(),
            Action::Paste => self.paste(),
            Action::StartSelection => {
                self.start_selection();
                true
            }
        }
    }

    /// Replace the entire text. Normalises line endings, moves the cursor
    /// to the end of the last line, and clears the preferred column.
    pub fn set_text(&mut self, text: &str, push_undo: bool) {
        if push_undo {
            self.begin_mutation();
        } else {
            self.selection_anchor = None;
        }
        let text = normalize_newlines(text);
        self.lines = text.split('\n').map(str::to_string).collect();
        let row = self.lines.len() - 1;
        self.cursor = Position::new(row, cp_len(&self.lines[row]));
        self.preferred_col = None;
    }

    /// Apply an ordered insert/backspace batch as a single undo step.
    pub fn apply_operations(&mut self, ops: &[TextOp]) {
        let expanded = expand_ops(ops);
        if expanded.is_empty() {
            return;
        }
        self.begin_mutation();
        self.preferred_col = None;
        for op in &expanded {
            match op {
                TextOp::Insert(payload) => {
                    let cleaned = normalize_newlines(&strip_unsafe(payload));
                    self.splice_at_cursor(&cleaned);
                }
                TextOp::Backspace => self.backspace_raw(),
            }
        }
    }

    /// Forward-delete: remove the code point at the cursor, or join with
    /// the next line when at line end.
    pub fn delete(&mut self) {
        let Position { row, col } = self.cursor;
        if col < self.line_len(row) {
            self.begin_mutation();
            self.preferred_col = None;
            let line = &self.lines[row];
            let updated = format!("{}{}", cp_slice(line, 0, col), cp_slice_from(line, col + 1));
            self.lines[row] = updated;
        } else if row + 1 < self.lines.len() {
            self.begin_mutation();
            self.preferred_col = None;
            let next = self.lines.remove(row + 1);
            self.lines[row].push_str(&next);
        }
    }

    /// Delete the word to the left of the cursor.
    ///
    /// At column 0 of a non-first line this merges with the previous line,
    /// like backspace. Otherwise a run of non-word characters and then a
    /// run of word characters to the left are removed; if only
    /// whitespace/punctuation lies to the left, exactly one code point is
    /// removed.
    pub fn delete_word_left(&mut self) {
        let Position { row, col } = self.cursor;
        if col == 0 {
            if row == 0 {
                return;
            }
            self.begin_mutation();
            self.preferred_col = None;
            self.backspace_raw();
            return;
        }

        let cps: Vec<char> = self.lines[row].chars().collect();
        let mut i = col;
        while i > 0 && !is_word_char(cps[i - 1]) {
            i -= 1;
        }
        let start = if i == 0 {
            col - 1
        } else {
            while i > 0 && is_word_char(cps[i - 1]) {
                i -= 1;
            }
            i
        };

        self.begin_mutation();
        self.preferred_col = None;
        let line = &self.lines[row];
        let updated = format!("{}{}", cp_slice(line, 0, start), cp_slice_from(line, col));
        self.lines[row] = updated;
        self.cursor.col = start;
    }

    /// Delete the word to the right of the cursor.
    ///
    /// At the end of a non-last line this joins with the next line, like
    /// forward delete. The one-code-point special case mirrors
    /// [`Self::delete_word_left`].
    pub fn delete_word_right(&mut self) {
        let Position { row, col } = self.cursor;
        let len = self.line_len(row);
        if col >= len {
            if row + 1 < self.lines.len() {
                self.delete();
            }
            return;
        }

        let cps: Vec<char> = self.lines[row].chars().collect();
        let mut i = col;
        while i < len && !is_word_char(cps[i]) {
            i += 1;
        }
        let end = if i == len {
            col + 1
        } else {
            while i < len && is_word_char(cps[i]) {
                i += 1;
            }
            i
        };

        self.begin_mutation();
        self.preferred_col = None;
        let line = &self.lines[row];
        let updated = format!("{}{}", cp_slice(line, 0, col), cp_slice_from(line, end));
        self.lines[row] = updated;
    }

    /// Delete from the cursor to the end of the line; at line end, join
    /// with the next line.
    pub fn kill_line_right(&mut self) {
        let Position { row, col } = self.cursor;
        if col < self.line_len(row) {
            self.begin_mutation();
            self.preferred_col = None;
            let updated = cp_slice(&self.lines[row], 0, col);
            self.lines[row] = updated;
        } else {
            self.delete();
        }
    }

    /// Delete from the start of the line to the cursor; no-op at column 0.
    pub fn kill_line_left(&mut self) {
        let Position { row, col } = self.cursor;
        if col == 0 {
            return;
        }
        self.begin_mutation();
        self.preferred_col = None;
        let updated = cp_slice_from(&self.lines[row], col);
        self.lines[row] = updated;
        self.cursor.col = 0;
    }

    /// Move the cursor one step in the wrapped view.
    ///
    /// Left/right step by one visual column and wrap across visual rows at
    /// the edges. Horizontal directions clear the preferred column;
    /// vertical motion remembers the current visual column on first use and
    /// reuses it while the run of vertical moves lasts.
    pub fn move_cursor(&mut self, dir: Direction, layout: &VisualLayout) {
        match dir {
            Direction::Left => {
                self.preferred_col = None;
                let visual = layout.visual_cursor();
                let target = if visual.col > 0 {
                    VisualPosition::new(visual.row, visual.col - 1)
                } else if visual.row > 0 {
                    let prev = visual.row - 1;
                    VisualPosition::new(prev, layout.visual_line_len(prev))
                } else {
                    return;
                };
                let mut logical = layout.to_logical(target);
                if logical == self.cursor {
                    // At a hard wrap the trailing end of the previous chunk
                    // aliases this position; take one more visual column.
                    logical =
                        layout.to_logical(VisualPosition::new(target.row, target.col.saturating_sub(1)));
                }
                self.cursor = logical;
            }
            Direction::Right => {
                self.preferred_col = None;
                let visual = layout.visual_cursor();
                let target = if visual.col < layout.visual_line_len(visual.row) {
                    VisualPosition::new(visual.row, visual.col + 1)
                } else if visual.row + 1 < layout.visual_line_count() {
                    VisualPosition::new(visual.row + 1, 0)
                } else {
                    return;
                };
                let mut logical = layout.to_logical(target);
                if logical == self.cursor {
                    // At a hard wrap the head of the next chunk aliases the
                    // trailing end of this one; take one more visual column.
                    logical = layout.to_logical(VisualPosition::new(target.row, target.col + 1));
                }
                self.cursor = logical;
            }
            Direction::Up | Direction::Down => {
                let visual = layout.visual_cursor();
                let target_col = match self.preferred_col {
                    Some(col) => col,
                    None => {
                        self.preferred_col = Some(visual.col);
                        visual.col
                    }
                };
                let target_row = if dir == Direction::Up {
                    if visual.row == 0 {
                        return;
                    }
                    visual.row - 1
                } else {
                    if visual.row + 1 >= layout.visual_line_count() {
                        return;
                    }
                    visual.row + 1
                };
                let col = target_col.min(layout.visual_line_len(target_row));
                self.cursor = layout.to_logical(VisualPosition::new(target_row, col));
            }
            Direction::Home => {
                self.preferred_col = None;
                let visual = layout.visual_cursor();
                self.cursor = layout.to_logical(VisualPosition::new(visual.row, 0));
            }
            Direction::End => {
                self.preferred_col = None;
                let visual = layout.visual_cursor();
                let len = layout.visual_line_len(visual.row);
                self.cursor = layout.to_logical(VisualPosition::new(visual.row, len));
            }
        }
    }

    /// Move the cursor to a code-point offset in the current text.
    pub fn move_to_offset(&mut self, offset: usize) {
        self.preferred_col = None;
        self.cursor = offset_to_position(&self.text(), offset);
    }

    /// Replace `[start, end)` with `text` (newlines normalised); the cursor
    /// ends at the end of the inserted text.
    ///
    /// Returns `false` without modifying anything when the range is
    /// out of order or out of bounds.
    pub fn replace_range(&mut self, start: Position, end: Position, text: &str) -> bool {
        if start > end || !self.is_valid(start) || !self.is_valid(end) {
            tracing::debug!(?start, ?end, "replace_range rejected");
            return false;
        }
        self.begin_mutation();
        self.preferred_col = None;

        let before = cp_slice(&self.lines[start.row], 0, start.col);
        let after = cp_slice_from(&self.lines[end.row], end.col);
        self.lines
            .splice(start.row..=end.row, [format!("{before}{after}")]);
        self.cursor = start;
        self.splice_at_cursor(&normalize_newlines(text));
        true
    }

    /// Copy the selected span to the internal clipboard.
    ///
    /// Lines are joined with `\n`. The selection is left active. Returns
    /// `None` (and leaves the clipboard untouched) when nothing is
    /// selected.
    pub fn copy(&mut self) -> Option<String> {
        let (start, end) = self.selection()?;
        let copied = self.slice_range(start, end);
        self.clipboard = Some(copied.clone());
        Some(copied)
    }

    /// Insert the internal clipboard at the cursor. Returns `false` when
    /// the clipboard is empty.
    pub fn paste(&mut self) -> bool {
        let Some(content) = self.clipboard.clone() else {
            return false;
        };
        if content.is_empty() {
            return false;
        }
        self.apply_operations(&[TextOp::Insert(content)]);
        true
    }

    /// Anchor a selection at the current cursor.
    pub fn start_selection(&mut self) {
        self.selection_anchor = Some(self.cursor);
    }

    /// Insert already-sanitised text at the cursor, splitting on newlines.
    ///
    /// The first fragment joins the text before the cursor, intermediate
    /// fragments become new lines, and the last fragment joins the text
    /// after the cursor; the cursor ends after the last fragment.
    fn splice_at_cursor(&mut self, cleaned: &str) {
        let Position { row, col } = self.cursor;
        let line = &self.lines[row];
        let before = cp_slice(line, 0, col);
        let after = cp_slice_from(line, col);

        let fragments: Vec<&str> = cleaned.split('\n').collect();
        if fragments.len() == 1 {
            self.lines[row] = format!("{before}{}{after}", fragments[0]);
            self.cursor.col = col + cp_len(fragments[0]);
            return;
        }

        let last = fragments[fragments.len() - 1];
        let mut new_lines = Vec::with_capacity(fragments.len());
        new_lines.push(format!("{before}{}", fragments[0]));
        for mid in &fragments[1..fragments.len() - 1] {
            new_lines.push((*mid).to_string());
        }
        new_lines.push(format!("{last}{after}"));
        self.lines.splice(row..=row, new_lines);
        self.cursor = Position::new(row + fragments.len() - 1, cp_len(last));
    }

    /// Remove one code point to the left, merging lines at column 0.
    /// No-op at the buffer origin.
    fn backspace_raw(&mut self) {
        let Position { row, col } = self.cursor;
        if col > 0 {
            let line = &self.lines[row];
            let updated = format!("{}{}", cp_slice(line, 0, col - 1), cp_slice_from(line, col));
            self.lines[row] = updated;
            self.cursor.col = col - 1;
        } else if row > 0 {
            let removed = self.lines.remove(row);
            let join_col = cp_len(&self.lines[row - 1]);
            self.lines[row - 1].push_str(&removed);
            self.cursor = Position::new(row - 1, join_col);
        }
    }

    /// The text spanned by an ordered logical range, lines joined with `\n`.
    fn slice_range(&self, start: Position, end: Position) -> String {
        if start.row == end.row {
            return cp_slice(&self.lines[start.row], start.col, end.col);
        }
        let mut out = cp_slice_from(&self.lines[start.row], start.col);
        for row in start.row + 1..end.row {
            out.push('\n');
            out.push_str(&self.lines[row]);
        }
        out.push('\n');
        out.push_str(&cp_slice(&self.lines[end.row], 0, end.col));
        out
    }
}
