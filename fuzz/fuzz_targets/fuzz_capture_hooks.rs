#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rewind_core::{RopeBuffer, TextBuffer};
use rewind_history::{EditHistory, HistoryConfig};

#[derive(Arbitrary, Debug)]
enum HookCall {
    Before {
        start: u16,
        removed: u16,
        inserted_after: u16,
    },
    After {
        start: u16,
        removed_before: u16,
        inserted: u16,
    },
    // Direct buffer edits with no notification, desynchronizing the engine.
    MutateInsert {
        at: u16,
        text: String,
    },
    MutateDelete {
        a: u16,
        b: u16,
    },
    Undo,
    Redo,
    Clear,
}

fuzz_target!(|calls: Vec<HookCall>| {
    let mut history = EditHistory::new(HistoryConfig::new(64, 4096));
    let mut buffer = RopeBuffer::new();

    for call in calls {
        match call {
            HookCall::Before {
                start,
                removed,
                inserted_after,
            } => history.on_before_change(
                &buffer,
                start as usize,
                removed as usize,
                inserted_after as usize,
            ),
            HookCall::After {
                start,
                removed_before,
                inserted,
            } => history.on_after_change(
                &buffer,
                start as usize,
                removed_before as usize,
                inserted as usize,
            ),
            HookCall::MutateInsert { at, text } => buffer.insert(at as usize, &text),
            HookCall::MutateDelete { a, b } => buffer.delete(a as usize, b as usize),
            HookCall::Undo => history.undo(&mut buffer),
            HookCall::Redo => history.redo(&mut buffer),
            HookCall::Clear => history.clear_history(),
        }

        // Bookkeeping must stay coherent no matter how inconsistent the
        // notifications were.
        assert_eq!(history.can_undo(), history.undo_depth() > 0);
        assert_eq!(history.can_redo(), history.redo_depth() > 0);
        assert!(
            !history.capture_gate().is_suppressed(),
            "suppression leaked out of a traversal"
        );

        let undo_actions = history.undo_actions(usize::MAX);
        let redo_actions = history.redo_actions(usize::MAX);
        let recomputed: usize = undo_actions
            .iter()
            .chain(redo_actions.iter())
            .map(|action| action.size_bytes())
            .sum();
        assert_eq!(recomputed, history.memory_usage(), "byte accounting drifted");

        // Newest first: group ids never increase along the undo stack, which
        // also keeps equal groups adjacent.
        assert!(
            undo_actions.windows(2).all(|w| w[0].group() >= w[1].group()),
            "undo stack group order corrupted"
        );
    }

    // Draining both stacks must terminate and never panic, whatever state
    // the buffer was left in.
    while history.can_undo() {
        let before = history.undo_depth();
        history.undo(&mut buffer);
        assert!(history.undo_depth() < before, "undo made no progress");
    }
    while history.can_redo() {
        let before = history.redo_depth();
        history.redo(&mut buffer);
        assert!(history.redo_depth() < before, "redo made no progress");
    }
});
