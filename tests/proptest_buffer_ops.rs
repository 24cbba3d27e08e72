//! Property-based tests for the edit engine and layouter.
//!
//! Uses proptest to verify invariants that must hold across all valid
//! inputs: cursor validity, history bounds, undo/redo laws, the offset
//! mapper bijection, and wrapping guarantees.

use proptest::prelude::*;
use textfield::unicode::{cp_len, visual_width};
use textfield::{
    Action, BufferState, Direction, InputField, NullHost, Position, TextOp, Viewport,
    VisualLayout, MAX_UNDO_DEPTH,
};

// ============================================================================
// Strategies
// ============================================================================

/// Single-line printable text (no control characters).
fn inline_text() -> impl Strategy<Value = String> {
    "\\PC{0,30}"
}

/// Multi-line text mixing ASCII, wide characters, and separators.
fn multiline_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z 日本語.,!?]{0,12}", 1..6).prop_map(|lines| lines.join("\n"))
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
        Direction::Home,
        Direction::End,
    ])
}

/// Any engine action, weighted toward edits.
fn any_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => "\\PC{0,8}".prop_map(|s| Action::ApplyOperations(vec![TextOp::Insert(s)])),
        2 => Just(Action::ApplyOperations(vec![TextOp::Backspace])),
        1 => Just(Action::ApplyOperations(vec![
            TextOp::Insert("a\u{7F}b".to_string()),
            TextOp::Backspace,
        ])),
        1 => Just(Action::Delete),
        1 => Just(Action::DeleteWordLeft),
        1 => Just(Action::DeleteWordRight),
        1 => Just(Action::KillLineRight),
        1 => Just(Action::KillLineLeft),
        2 => direction().prop_map(Action::Move),
        1 => (0usize..60).prop_map(Action::MoveToOffset),
        1 => Just(Action::Undo),
        1 => Just(Action::Redo),
        1 => Just(Action::StartSelection),
        1 => Just(Action::Copy),
        1 => Just(Action::Paste),
        1 => (0usize..4, 0usize..6, 0usize..4, 0usize..6, "\\PC{0,5}").prop_map(
            |(sr, sc, er, ec, text)| Action::ReplaceRange {
                start: Position::new(sr, sc),
                end: Position::new(er, ec),
                text,
            }
        ),
    ]
}

/// Actions that are mutating by classification (everything except moves,
/// copy, and selection start).
fn mutating_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => "\\PC{0,8}".prop_map(|s| Action::ApplyOperations(vec![TextOp::Insert(s)])),
        2 => Just(Action::ApplyOperations(vec![TextOp::Backspace])),
        1 => Just(Action::Delete),
        1 => Just(Action::DeleteWordLeft),
        1 => Just(Action::DeleteWordRight),
        1 => Just(Action::KillLineRight),
        1 => Just(Action::KillLineLeft),
        1 => inline_text().prop_map(|text| Action::SetText {
            text,
            push_undo: true
        }),
        1 => (0usize..3, 0usize..5, 0usize..3, 0usize..5, "\\PC{0,5}").prop_map(
            |(sr, sc, er, ec, text)| Action::ReplaceRange {
                start: Position::new(sr, sc),
                end: Position::new(er, ec),
                text,
            }
        ),
    ]
}

fn layout_for(state: &BufferState, width: usize) -> VisualLayout {
    VisualLayout::compute(state.lines(), state.cursor(), width)
}

// ============================================================================
// Engine invariants
// ============================================================================

proptest! {
    /// After any action sequence: lines non-empty, cursor and anchor valid,
    /// history bounded.
    #[test]
    fn state_invariants_hold(
        text in multiline_text(),
        actions in prop::collection::vec(any_action(), 0..40),
    ) {
        let mut state = BufferState::new(&text, 0);
        for action in actions {
            let layout = layout_for(&state, 10);
            state.apply(action, &layout);

            prop_assert!(!state.lines().is_empty());
            prop_assert!(state.is_valid(state.cursor()));
            prop_assert!(state.undo_depth() <= MAX_UNDO_DEPTH);
            if let Some(anchor) = state.selection_anchor() {
                prop_assert!(state.is_valid(anchor));
            }
        }
    }

    /// A single mutating action followed by undo restores lines and cursor
    /// exactly.
    #[test]
    fn undo_reverts_single_mutation(
        text in multiline_text(),
        offset in 0usize..40,
        action in mutating_action(),
    ) {
        let mut state = BufferState::new(&text, offset);
        let lines_before = state.lines().to_vec();
        let cursor_before = state.cursor();
        let depth_before = state.undo_depth();

        let layout = layout_for(&state, 10);
        state.apply(action, &layout);

        if state.undo_depth() > depth_before {
            // The action pushed a snapshot: redo must be empty now.
            prop_assert_eq!(state.redo_depth(), 0);
            prop_assert!(state.pop_undo());
            prop_assert_eq!(state.lines(), &lines_before[..]);
            prop_assert_eq!(state.cursor(), cursor_before);
        } else {
            // No-op action: state must be untouched.
            prop_assert_eq!(state.lines(), &lines_before[..]);
        }
    }

    /// Redo after undo restores the post-mutation state.
    #[test]
    fn redo_after_undo_is_identity(
        text in multiline_text(),
        action in mutating_action(),
    ) {
        let mut state = BufferState::new(&text, 0);
        let layout = layout_for(&state, 10);
        state.apply(action, &layout);

        let lines_after = state.lines().to_vec();
        let cursor_after = state.cursor();

        if state.pop_undo() {
            prop_assert!(state.pop_redo());
            prop_assert_eq!(state.lines(), &lines_after[..]);
            prop_assert_eq!(state.cursor(), cursor_after);
        }
    }
}

// ============================================================================
// Offset mapper
// ============================================================================

proptest! {
    /// `position_to_offset . offset_to_position` clamps to the maximum
    /// offset and is the identity below it.
    #[test]
    fn offset_round_trip(text in multiline_text(), offset in 0usize..80) {
        let max_offset = text.chars().count();
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();

        let pos = textfield::text::offset_to_position(&text, offset);
        let back = textfield::text::position_to_offset(&lines, pos);
        prop_assert_eq!(back, offset.min(max_offset));
    }
}

// ============================================================================
// Layout invariants
// ============================================================================

proptest! {
    /// Every wrapped line fits the viewport, except a lone code point wider
    /// than it.
    #[test]
    fn wrapped_lines_fit_viewport(
        text in multiline_text(),
        width in 1usize..20,
    ) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let layout = VisualLayout::compute(&lines, Position::origin(), width);

        prop_assert!(layout.visual_line_count() >= 1);
        for line in layout.visual_lines() {
            if cp_len(line) > 1 {
                prop_assert!(
                    visual_width(line) <= width,
                    "line {:?} exceeds width {}", line, width
                );
            }
        }
    }

    /// Concatenating a logical line's chunks, restoring the skipped wrap
    /// delimiters, reconstructs the line exactly.
    #[test]
    fn chunks_reconstruct_logical_lines(
        text in multiline_text(),
        width in 1usize..20,
    ) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        let layout = VisualLayout::compute(&lines, Position::origin(), width);

        for (row, line) in lines.iter().enumerate() {
            let mut rebuilt = String::new();
            let mut prev_end: Option<usize> = None;
            for &(vrow, start) in layout.chunks_of(row) {
                if let Some(end) = prev_end {
                    if start == end + 1 {
                        rebuilt.push(' ');
                    }
                }
                rebuilt.push_str(&layout.visual_lines()[vrow]);
                prev_end = Some(start + layout.visual_line_len(vrow));
            }
            prop_assert_eq!(&rebuilt, line, "row {}", row);
        }
    }

    /// The visual cursor names a real visual line and column.
    #[test]
    fn visual_cursor_in_bounds(
        text in multiline_text(),
        offset in 0usize..60,
        width in 1usize..16,
    ) {
        let state = BufferState::new(&text, offset);
        let layout = layout_for(&state, width);
        let visual = layout.visual_cursor();
        prop_assert!(visual.row < layout.visual_line_count());
        prop_assert!(visual.col <= layout.visual_line_len(visual.row));
    }
}

// ============================================================================
// Controller invariants
// ============================================================================

proptest! {
    /// The visual cursor always stays inside the scrolled viewport.
    #[test]
    fn cursor_stays_in_viewport(
        text in multiline_text(),
        actions in prop::collection::vec(any_action(), 0..25),
        width in 2usize..12,
        height in 1usize..4,
    ) {
        let mut f = InputField::with_text(NullHost, Viewport::new(width, height), &text, 0);
        let drive = |f: &mut InputField<NullHost>, action: Action| match action {
            Action::ApplyOperations(ops) => f.apply_operations(ops),
            Action::Move(dir) => f.move_cursor(dir),
            Action::MoveToOffset(o) => f.move_to_offset(o),
            Action::Undo => { f.undo(); }
            Action::Redo => { f.redo(); }
            Action::Delete => f.del(),
            Action::DeleteWordLeft => f.delete_word_left(),
            Action::DeleteWordRight => f.delete_word_right(),
            Action::KillLineRight => f.kill_line_right(),
            Action::KillLineLeft => f.kill_line_left(),
            Action::StartSelection => f.start_selection(),
            Action::Copy => { f.copy(); }
            Action::Paste => { f.paste(); }
            Action::SetText { text, .. } => f.set_text(&text),
            Action::ReplaceRange { start, end, text } => {
                f.replace_range(start.row, start.col, end.row, end.col, &text);
            }
        };
        for action in actions {
            drive(&mut f, action);
            let row = f.visual_cursor().row;
            let scroll = f.visual_scroll_row();
            prop_assert!(row >= scroll, "cursor row {} above scroll {}", row, scroll);
            prop_assert!(
                row < scroll + height.max(1),
                "cursor row {} below viewport (scroll {}, height {})", row, scroll, height
            );
        }
    }
}
