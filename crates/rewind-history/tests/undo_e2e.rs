//! E2E: full editing sessions driven through the public surface.
//!
//! Every test walks a realistic edit sequence (typing, backspacing,
//! selection replaces, programmatic edits) and checks the buffer text,
//! cursor placement, and stack accounting after each traversal step.
//!
//! Invariants exercised here:
//! - Undo followed by redo is an exact round trip for text and stacks.
//! - A replace reverts and reapplies as one logical operation.
//! - A fresh edit after undo discards the redo branch permanently.
//! - Bounded history loses only the oldest operations.
//!
//! | Failure mode | Meaning |
//! |--------------|---------|
//! | text mismatch after undo | traversal applied the wrong inverse |
//! | text mismatch after redo | redo stack order corrupted |
//! | wrong selection after undo | recorded span lost or misapplied |
//! | depth mismatch | group boundaries split or merged |

use rewind_core::{RopeBuffer, Selection, TextBuffer};
use rewind_history::{EditHistory, EditSession, HistoryConfig};

fn session(text: &str) -> EditSession<RopeBuffer> {
    EditSession::new(RopeBuffer::from_text(text))
}

#[test]
fn insert_then_replace_scenario() {
    let mut s = session("hello");

    s.insert(5, " world").unwrap();
    assert_eq!(s.text(), "hello world");
    assert_eq!(s.history().undo_depth(), 1);

    s.undo();
    assert_eq!(s.text(), "hello");
    s.redo();
    assert_eq!(s.text(), "hello world");

    s.replace(0, 5, "HI").unwrap();
    assert_eq!(s.text(), "HI world");
    let actions = s.history().undo_actions(2);
    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].group(), actions[1].group());

    // One undo reverts both halves of the replace and re-selects the span
    // the user had replaced.
    s.undo();
    assert_eq!(s.text(), "hello world");
    assert_eq!(s.buffer().selection(), Selection::span(0, 5));

    s.redo();
    assert_eq!(s.text(), "HI world");
}

#[test]
fn typing_session_char_by_char() {
    let mut s = session("");
    for (i, ch) in "rust!".chars().enumerate() {
        s.insert(i, &ch.to_string()).unwrap();
    }
    assert_eq!(s.text(), "rust!");
    assert_eq!(s.history().undo_depth(), 5);

    for expected in ["rust", "rus", "ru", "r", ""] {
        s.undo();
        assert_eq!(s.text(), expected);
    }
    assert!(!s.history().can_undo());

    for expected in ["r", "ru", "rus", "rust", "rust!"] {
        s.redo();
        assert_eq!(s.text(), expected);
    }
    assert!(!s.history().can_redo());
}

#[test]
fn backspace_sequence_restores_in_order() {
    let mut s = session("abc");
    s.delete(2, 3).unwrap();
    s.delete(1, 2).unwrap();
    s.delete(0, 1).unwrap();
    assert_eq!(s.text(), "");

    s.undo();
    assert_eq!(s.text(), "a");
    assert_eq!(s.buffer().selection(), Selection::caret(1));
    s.undo();
    assert_eq!(s.text(), "ab");
    assert_eq!(s.buffer().selection(), Selection::caret(2));
    s.undo();
    assert_eq!(s.text(), "abc");
    assert_eq!(s.buffer().selection(), Selection::caret(3));
}

#[test]
fn selection_replace_round_trip() {
    let mut s = session("the quick brown fox");
    s.replace(4, 9, "slow").unwrap();
    assert_eq!(s.text(), "the slow brown fox");

    s.undo();
    assert_eq!(s.text(), "the quick brown fox");
    assert_eq!(s.buffer().selection(), Selection::span(4, 9));

    s.redo();
    assert_eq!(s.text(), "the slow brown fox");
    assert_eq!(s.buffer().selection(), Selection::caret(8));
}

#[test]
fn unicode_replace_round_trip() {
    let mut s = session("こんにちは");
    s.replace(0, 5, "今日は").unwrap();
    assert_eq!(s.text(), "今日は");

    s.insert(3, "🎌").unwrap();
    assert_eq!(s.text(), "今日は🎌");

    s.undo();
    assert_eq!(s.text(), "今日は");
    s.undo();
    assert_eq!(s.text(), "こんにちは");
    assert_eq!(s.buffer().selection(), Selection::span(0, 5));

    s.redo();
    s.redo();
    assert_eq!(s.text(), "今日は🎌");
}

#[test]
fn multiline_edit_round_trip() {
    let mut s = session("line one\nline two\n");
    s.replace(9, 17, "LINE TWO").unwrap();
    assert_eq!(s.text(), "line one\nLINE TWO\n");

    s.delete(8, 9).unwrap();
    assert_eq!(s.text(), "line oneLINE TWO\n");

    s.undo();
    assert_eq!(s.text(), "line one\nLINE TWO\n");
    s.undo();
    assert_eq!(s.text(), "line one\nline two\n");
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut s = session("");
    s.insert(0, "first").unwrap();
    s.undo();
    assert!(s.history().can_redo());

    s.insert(0, "second").unwrap();
    assert!(!s.history().can_redo());

    // The discarded branch never comes back.
    s.redo();
    assert_eq!(s.text(), "second");
}

#[test]
fn grouped_undo_counts() {
    let mut s = session("hello world");
    s.replace(6, 11, "rust").unwrap();
    assert_eq!(s.text(), "hello rust");
    assert_eq!(s.history().undo_depth(), 2);

    s.undo();
    assert_eq!(s.history().undo_depth(), 0);
    assert_eq!(s.history().redo_depth(), 2);

    s.redo();
    assert_eq!(s.history().undo_depth(), 2);
    assert_eq!(s.history().redo_depth(), 0);
}

#[test]
fn interleaved_undo_redo_walk() {
    let mut s = session("");
    s.insert(0, "one ").unwrap();
    s.insert(4, "two ").unwrap();
    s.replace(0, 3, "ONE").unwrap();
    assert_eq!(s.text(), "ONE two ");

    s.undo();
    assert_eq!(s.text(), "one two ");
    s.undo();
    assert_eq!(s.text(), "one ");
    s.redo();
    assert_eq!(s.text(), "one two ");
    s.undo();
    assert_eq!(s.text(), "one ");
    s.undo();
    assert_eq!(s.text(), "");

    s.redo();
    s.redo();
    s.redo();
    assert_eq!(s.text(), "ONE two ");
    assert!(!s.history().can_redo());
}

#[test]
fn bounded_session_loses_oldest_only() {
    let mut s = EditSession::with_config(RopeBuffer::new(), HistoryConfig::new(2, 0));
    for (i, word) in ["a", "b", "c", "d"].iter().enumerate() {
        s.insert(i, word).unwrap();
    }
    assert_eq!(s.text(), "abcd");
    assert_eq!(s.history().undo_depth(), 2);

    s.undo();
    s.undo();
    // The two oldest insertions were evicted; undo bottoms out mid-session.
    assert_eq!(s.text(), "ab");
    assert!(!s.history().can_undo());

    s.redo();
    s.redo();
    assert_eq!(s.text(), "abcd");
}

#[test]
fn clear_history_mid_session() {
    let mut s = session("");
    s.insert(0, "before").unwrap();
    assert!(s.history().memory_usage() > 0);

    s.clear_history();
    assert_eq!(s.history().memory_usage(), 0);
    assert_eq!(s.text(), "before");

    s.insert(6, " after").unwrap();
    s.undo();
    assert_eq!(s.text(), "before");
    assert!(!s.history().can_undo());
}

#[test]
fn host_driven_hooks_match_session() {
    let mut history = EditHistory::default();
    let mut buffer = RopeBuffer::from_text("draft");

    // A host replacing the whole word, wired by hand.
    history.on_before_change(&buffer, 0, 5, 5);
    buffer.delete(0, 5);
    buffer.insert(0, "final");
    buffer.set_cursor(5);
    history.on_after_change(&buffer, 0, 5, 5);
    assert_eq!(buffer.text(), "final");
    assert_eq!(history.undo_depth(), 2);

    history.undo(&mut buffer);
    assert_eq!(buffer.text(), "draft");
    assert_eq!(buffer.selection(), Selection::span(0, 5));

    history.redo(&mut buffer);
    assert_eq!(buffer.text(), "final");
}

#[test]
fn suppression_scope_keeps_programmatic_edits_out() {
    let mut s = session("");
    s.insert(0, "user text").unwrap();

    let gate = s.history().capture_gate();
    let scope = gate.suppress();
    s.insert(9, " [auto-saved]").unwrap();
    drop(scope);

    assert_eq!(s.text(), "user text [auto-saved]");
    assert_eq!(s.history().undo_depth(), 1);

    // Undo reverts only the user's edit; the programmatic suffix stays.
    s.undo();
    assert_eq!(s.text(), " [auto-saved]");
}
