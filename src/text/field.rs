//! The input-field controller.
//!
//! [`InputField`] wraps the edit engine with everything a live terminal
//! input needs: a cached visual layout, scroll tracking that keeps the
//! cursor inside the viewport, change notification, the default key
//! mapping, drag-drop path inference, and the external-editor round trip.

use crate::debug;
use crate::external;
use crate::host::Host;
use crate::input::{KeyCode, KeyEvent};
use crate::text::action::{Action, Direction, TextOp};
use crate::text::layout::{VisualLayout, VisualPosition};
use crate::text::position::{offset_to_position, Position};
use crate::text::state::BufferState;
use crate::unicode::cp_len;

/// Viewport dimensions in character cells.
///
/// Wide characters occupy two cells. Both dimensions are clamped to at
/// least one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Create a viewport, clamping both dimensions to >= 1.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 10)
    }
}

/// A multi-line input field: edit engine, wrapped view, and host glue.
pub struct InputField<H: Host> {
    state: BufferState,
    viewport: Viewport,
    scroll_row: usize,
    layout: VisualLayout,
    host: H,
}

impl<H: Host> InputField<H> {
    /// Create an empty field.
    pub fn new(host: H, viewport: Viewport) -> Self {
        Self::with_text(host, viewport, "", 0)
    }

    /// Create a field from initial text and a code-point cursor offset.
    pub fn with_text(
        host: H,
        viewport: Viewport,
        initial_text: &str,
        initial_cursor_offset: usize,
    ) -> Self {
        let state = BufferState::new(initial_text, initial_cursor_offset);
        let layout = VisualLayout::compute(state.lines(), state.cursor(), viewport.width);
        let mut field = Self {
            state,
            viewport,
            scroll_row: 0,
            layout,
            host,
        };
        field.snap_scroll();
        field
    }

    // ------------------------------------------------------------------
    // Read-only surface
    // ------------------------------------------------------------------

    /// The buffer's lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        self.state.lines()
    }

    /// The buffer's full text.
    #[must_use]
    pub fn text(&self) -> String {
        self.state.text()
    }

    /// The logical cursor.
    #[must_use]
    pub fn cursor(&self) -> Position {
        self.state.cursor()
    }

    /// The remembered visual column for vertical motion, if any.
    #[must_use]
    pub fn preferred_col(&self) -> Option<usize> {
        self.state.preferred_col()
    }

    /// The selection anchor, if a selection is active.
    #[must_use]
    pub fn selection_anchor(&self) -> Option<Position> {
        self.state.selection_anchor()
    }

    /// Every wrapped visual line of the buffer.
    #[must_use]
    pub fn all_visual_lines(&self) -> &[String] {
        self.layout.visual_lines()
    }

    /// The visual lines currently inside the viewport.
    #[must_use]
    pub fn viewport_visual_lines(&self) -> &[String] {
        let all = self.layout.visual_lines();
        let start = self.scroll_row.min(all.len());
        let end = (start + self.viewport.height).min(all.len());
        &all[start..end]
    }

    /// The cursor in visual coordinates.
    #[must_use]
    pub fn visual_cursor(&self) -> VisualPosition {
        self.layout.visual_cursor()
    }

    /// The first visible visual row.
    #[must_use]
    pub fn visual_scroll_row(&self) -> usize {
        self.scroll_row
    }

    /// The current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The host capabilities object.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Resize the viewport; the layout is recomputed and scroll re-snapped.
    pub fn set_viewport(&mut self, width: usize, height: usize) {
        self.viewport = Viewport::new(width, height);
        self.layout =
            VisualLayout::compute(self.state.lines(), self.state.cursor(), self.viewport.width);
        self.snap_scroll();
    }

    /// Replace the whole text (undoable), cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        self.run(Action::SetText {
            text: text.to_string(),
            push_undo: true,
        });
    }

    /// Insert text at the cursor, with drag-drop path inference applied.
    pub fn insert(&mut self, text: &str) {
        let payload = self
            .infer_dropped_path(text)
            .unwrap_or_else(|| text.to_string());
        self.run(Action::ApplyOperations(vec![TextOp::Insert(payload)]));
    }

    /// Insert a newline at the cursor.
    pub fn newline(&mut self) {
        self.insert("\n");
    }

    /// Delete one code point to the left of the cursor.
    pub fn backspace(&mut self) {
        self.run(Action::ApplyOperations(vec![TextOp::Backspace]));
    }

    /// Forward-delete at the cursor.
    pub fn del(&mut self) {
        self.run(Action::Delete);
    }

    /// Move the cursor in the wrapped view.
    pub fn move_cursor(&mut self, dir: Direction) {
        self.run(Action::Move(dir));
    }

    /// Move the cursor to a code-point offset in the current text.
    pub fn move_to_offset(&mut self, offset: usize) {
        self.run(Action::MoveToOffset(offset));
    }

    /// Undo the most recent edit. Returns `false` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> bool {
        self.run(Action::Undo)
    }

    /// Redo the most recently undone edit. Returns `false` when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.run(Action::Redo)
    }

    /// Replace a logical range with text. Returns `false` and leaves the
    /// buffer untouched when the range is invalid.
    pub fn replace_range(
        &mut self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
        text: &str,
    ) -> bool {
        self.run(Action::ReplaceRange {
            start: Position::new(start_row, start_col),
            end: Position::new(end_row, end_col),
            text: text.to_string(),
        })
    }

    /// Replace a code-point offset range with text.
    pub fn replace_range_by_offset(
        &mut self,
        start_offset: usize,
        end_offset: usize,
        text: &str,
    ) -> bool {
        let current = self.state.text();
        let start = offset_to_position(&current, start_offset);
        let end = offset_to_position(&current, end_offset);
        self.run(Action::ReplaceRange {
            start,
            end,
            text: text.to_string(),
        })
    }

    /// Delete the word (or line join) to the left of the cursor.
    pub fn delete_word_left(&mut self) {
        self.run(Action::DeleteWordLeft);
    }

    /// Delete the word (or line join) to the right of the cursor.
    pub fn delete_word_right(&mut self) {
        self.run(Action::DeleteWordRight);
    }

    /// Delete from the cursor to the end of the line.
    pub fn kill_line_right(&mut self) {
        self.run(Action::KillLineRight);
    }

    /// Delete from the start of the line to the cursor.
    pub fn kill_line_left(&mut self) {
        self.run(Action::KillLineLeft);
    }

    /// Copy the selection to the internal clipboard and return it.
    pub fn copy(&mut self) -> Option<String> {
        self.state.copy()
    }

    /// Paste the internal clipboard at the cursor. Returns `false` when
    /// the clipboard is empty.
    pub fn paste(&mut self) -> bool {
        self.run(Action::Paste)
    }

    /// Anchor a selection at the cursor.
    pub fn start_selection(&mut self) {
        self.run(Action::StartSelection);
    }

    /// Apply an insert/backspace batch as a single undo step.
    pub fn apply_operations(&mut self, ops: Vec<TextOp>) {
        self.run(Action::ApplyOperations(ops));
    }

    /// Translate one key event through the default mapping.
    ///
    /// Returns `true` iff the text or cursor changed. Escape and unmapped
    /// keys return `false` without touching the buffer.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        if key.is_esc() {
            return false;
        }

        let cursor_before = self.state.cursor();
        let text_before = self.state.text();

        if key.is_enter() {
            self.newline();
        } else if key.code.is_navigation() && !key.ctrl() && !key.meta() {
            let dir = match key.code {
                KeyCode::Left => Direction::Left,
                KeyCode::Right => Direction::Right,
                KeyCode::Up => Direction::Up,
                KeyCode::Down => Direction::Down,
                KeyCode::Home => Direction::Home,
                _ => Direction::End,
            };
            self.move_cursor(dir);
        } else if key.code == KeyCode::Backspace || key.code == KeyCode::Char('\u{7F}') {
            self.backspace();
        } else if key.code == KeyCode::Delete || (key.ctrl() && key.code == KeyCode::Char('d')) {
            self.del();
        } else if let KeyCode::Char(c) = key.code {
            if key.ctrl() || key.meta() || c.is_control() {
                if debug::verbose() {
                    tracing::debug!(?key, "unhandled key");
                }
                return false;
            }
            self.insert(&c.to_string());
        } else {
            if debug::verbose() {
                tracing::debug!(?key, "unhandled key");
            }
            return false;
        }

        self.state.cursor() != cursor_before || self.state.text() != text_before
    }

    /// Edit the buffer in an external editor, blocking until it exits.
    ///
    /// The editor is chosen from `editor`, then `$VISUAL`, then `$EDITOR`,
    /// then the platform default. Raw mode is dropped around the launch and
    /// restored afterwards. The round trip is a single undo step; on any
    /// failure the pre-edit buffer is kept and the failure is only logged.
    pub fn open_in_external_editor(&mut self, editor: Option<&str>) {
        let editor = external::resolve_editor(editor);
        let text_before = self.state.text();

        self.state.begin_mutation();

        let was_raw = self.host.is_raw();
        if was_raw {
            if let Err(e) = self.host.set_raw_mode(false) {
                tracing::warn!(error = %e, "failed to leave raw mode for external editor");
            }
        }

        let result = external::edit_text(&text_before, &editor);

        if was_raw {
            if let Err(e) = self.host.set_raw_mode(true) {
                tracing::warn!(error = %e, "failed to restore raw mode after external editor");
            }
        }

        match result {
            Ok(edited) => {
                if debug::verbose() {
                    tracing::debug!(editor = %editor, bytes = edited.len(), "external edit applied");
                }
                // The snapshot above already covers this change.
                self.state.set_text(&edited, false);
                self.refresh(&text_before);
            }
            Err(e) => {
                tracing::warn!(editor = %editor, error = %e, "external editor failed; buffer preserved");
                self.state.cancel_mutation();
            }
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Apply an action, then bring the layout, scroll, and change sink up
    /// to date.
    fn run(&mut self, action: Action) -> bool {
        let text_before = self.state.text();
        let outcome = self.state.apply(action, &self.layout);
        self.refresh(&text_before);
        outcome
    }

    /// Recompute the layout, re-snap scroll, and notify the host if the
    /// text changed.
    fn refresh(&mut self, text_before: &str) {
        self.layout =
            VisualLayout::compute(self.state.lines(), self.state.cursor(), self.viewport.width);
        self.snap_scroll();

        let text_now = self.state.text();
        if text_now != text_before {
            self.host.on_change(&text_now);
        }
    }

    /// Move `scroll_row` the minimum amount needed to keep the visual
    /// cursor inside the viewport.
    fn snap_scroll(&mut self) {
        let height = self.viewport.height.max(1);
        let total = self.layout.visual_line_count();
        let cursor_row = self.layout.visual_cursor().row;

        let max_scroll = total.saturating_sub(height);
        if self.scroll_row > max_scroll {
            self.scroll_row = max_scroll;
        }
        if cursor_row < self.scroll_row {
            self.scroll_row = cursor_row;
        } else if cursor_row >= self.scroll_row + height {
            self.scroll_row = cursor_row + 1 - height;
        }
    }

    /// Recognise a dropped path in an inserted chunk.
    ///
    /// A chunk of at least three code points may be a path dragged onto the
    /// terminal: surrounding single quotes are stripped, whitespace
    /// trimmed, and the host's unescape + validation applied. A recognised
    /// path is inserted as `@path`. Applied once per insert, never to the
    /// result of a previous inference.
    fn infer_dropped_path(&self, text: &str) -> Option<String> {
        if cp_len(text) < 3 {
            return None;
        }
        let mut candidate = text.trim();
        if candidate.len() >= 2 && candidate.starts_with('\'') && candidate.ends_with('\'') {
            candidate = &candidate[1..candidate.len() - 1];
        }
        let candidate = candidate.trim();
        if candidate.is_empty() {
            return None;
        }
        let unescaped = self.host.unescape_path(candidate);
        if self.host.is_valid_path(&unescaped) {
            if debug::verbose() {
                tracing::debug!(path = %candidate, "drag-drop path recognised");
            }
            Some(format!("@{candidate}"))
        } else {
            None
        }
    }
}
