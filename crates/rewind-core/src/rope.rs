#![forbid(unsafe_code)]

//! Rope-backed reference buffer.
//!
//! [`RopeBuffer`] keeps its text in a [`ropey::Rope`] so edits anywhere in a
//! large buffer stay cheap, and tracks the current cursor/selection alongside
//! it. It is the buffer the engine's own tests run against and a reasonable
//! starting point for hosts without their own storage.

use ropey::Rope;

use crate::buffer::TextBuffer;
use crate::selection::Selection;

/// Reference [`TextBuffer`] implementation over a rope.
///
/// Every operation clamps offsets to the current buffer bounds, so no input
/// can make it panic. Deleting text re-clamps the stored selection; nothing
/// else moves it implicitly, because the history engine always repositions
/// the cursor explicitly after mutating.
#[derive(Debug, Clone, Default)]
pub struct RopeBuffer {
    rope: Rope,
    selection: Selection,
}

impl RopeBuffer {
    /// Create an empty buffer with the caret at offset 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`, with the caret at offset 0.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            selection: Selection::caret(0),
        }
    }

    /// Current cursor/selection state.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }
}

impl From<&str> for RopeBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl TextBuffer for RopeBuffer {
    fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).chars().collect()
    }

    fn insert(&mut self, offset: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let offset = offset.min(self.rope.len_chars());
        self.rope.insert(offset, text);
    }

    fn delete(&mut self, start: usize, end: usize) {
        let len = self.rope.len_chars();
        let start = start.min(len);
        let end = end.min(len);
        if start >= end {
            return;
        }
        self.rope.remove(start..end);
        self.selection = self.selection.clamped(self.rope.len_chars());
    }

    fn set_cursor(&mut self, offset: usize) {
        self.selection = Selection::caret(offset.min(self.rope.len_chars()));
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = Selection::span(start, end).clamped(self.rope.len_chars());
    }
}
