#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rewind_core::{RopeBuffer, TextBuffer};
use rewind_history::{EditSession, HistoryConfig};

#[derive(Arbitrary, Debug)]
enum ScriptOp {
    Insert { at: u16, text: String },
    Delete { a: u16, b: u16 },
    Replace { a: u16, b: u16, text: String },
    Undo,
    Redo,
    ClearHistory,
}

fuzz_target!(|ops: Vec<ScriptOp>| {
    let mut session = EditSession::with_config(RopeBuffer::new(), HistoryConfig::unlimited());

    // Linear-history model: one snapshot per applied operation, with a
    // cursor walking it as undo/redo move through time.
    let mut states: Vec<String> = vec![String::new()];
    let mut pos = 0usize;

    for op in ops {
        match op {
            ScriptOp::Insert { at, text } => {
                if text.is_empty() {
                    continue;
                }
                let len = session.buffer().len_chars();
                let at = at as usize % (len + 1);
                session.insert(at, &text).expect("clamped insert in bounds");
                commit(&mut states, &mut pos, session.text());
            }
            ScriptOp::Delete { a, b } => {
                let len = session.buffer().len_chars();
                let a = a as usize % (len + 1);
                let b = b as usize % (len + 1);
                let (a, b) = if a <= b { (a, b) } else { (b, a) };
                if a == b {
                    continue;
                }
                session.delete(a, b).expect("clamped delete in bounds");
                commit(&mut states, &mut pos, session.text());
            }
            ScriptOp::Replace { a, b, text } => {
                let len = session.buffer().len_chars();
                let a = a as usize % (len + 1);
                let b = b as usize % (len + 1);
                let (a, b) = if a <= b { (a, b) } else { (b, a) };
                if a == b && text.is_empty() {
                    continue;
                }
                session
                    .replace(a, b, &text)
                    .expect("clamped replace in bounds");
                commit(&mut states, &mut pos, session.text());
            }
            ScriptOp::Undo => {
                let could = session.history().can_undo();
                session.undo();
                if could {
                    assert!(pos > 0, "undo available past the oldest state");
                    pos -= 1;
                }
            }
            ScriptOp::Redo => {
                let could = session.history().can_redo();
                session.redo();
                if could {
                    pos += 1;
                    assert!(pos < states.len(), "redo available past the newest state");
                }
            }
            ScriptOp::ClearHistory => {
                session.clear_history();
                assert!(!session.history().can_undo(), "undo survives clear");
                assert!(!session.history().can_redo(), "redo survives clear");
                assert_eq!(session.history().memory_usage(), 0, "bytes survive clear");
                let current = states[pos].clone();
                states = vec![current];
                pos = 0;
            }
        }
        assert_eq!(session.text(), states[pos], "buffer diverged from model");
    }

    // Rewind the whole session, then replay it: both walks must retrace the
    // model exactly and bottom out where it does.
    while session.history().can_undo() {
        assert!(pos > 0, "undo available past the oldest state");
        session.undo();
        pos -= 1;
        assert_eq!(session.text(), states[pos], "undo diverged from model");
    }
    assert_eq!(pos, 0, "full undo stopped short of the oldest state");
    while session.history().can_redo() {
        session.redo();
        pos += 1;
        assert_eq!(session.text(), states[pos], "redo diverged from model");
    }
    assert_eq!(pos, states.len() - 1, "full redo stopped short");
});

fn commit(states: &mut Vec<String>, pos: &mut usize, text: String) {
    states.truncate(*pos + 1);
    states.push(text);
    *pos += 1;
}
