#![forbid(unsafe_code)]

//! Reference host wiring: a buffer with its history attached.
//!
//! [`EditSession`] owns a [`TextBuffer`] and an [`EditHistory`] and funnels
//! every edit through one splice path that validates the range, fires the
//! two change notifications in order around the mutation, and parks the
//! caret after the inserted text the way a text widget does. Hosts with
//! their own notification plumbing can skip this and drive the hooks on
//! [`EditHistory`] directly.

use std::fmt;

use rewind_core::TextBuffer;

use crate::history::{EditHistory, HistoryConfig};

/// Error for session edits with invalid ranges.
///
/// Validation happens before any notification fires, so a rejected edit
/// leaves both the buffer and the history untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The requested span does not fit the current buffer.
    OutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
    /// The requested span has `start > end`.
    InvertedRange { start: usize, end: usize },
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { start, end, len } => {
                write!(f, "span {start}..{end} out of bounds (length {len})")
            }
            Self::InvertedRange { start, end } => {
                write!(f, "inverted span {start}..{end}")
            }
        }
    }
}

impl std::error::Error for EditError {}

/// A text buffer with undo/redo history attached.
///
/// ```
/// use rewind_core::RopeBuffer;
/// use rewind_history::EditSession;
///
/// let mut session = EditSession::new(RopeBuffer::from_text("hello"));
/// session.insert(5, " world")?;
/// session.replace(0, 5, "HI")?;
/// assert_eq!(session.text(), "HI world");
///
/// session.undo();
/// assert_eq!(session.text(), "hello world");
/// session.undo();
/// assert_eq!(session.text(), "hello");
/// # Ok::<(), rewind_history::EditError>(())
/// ```
pub struct EditSession<B: TextBuffer> {
    buffer: B,
    history: EditHistory,
}

impl<B: TextBuffer + fmt::Debug> fmt::Debug for EditSession<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("buffer", &self.buffer)
            .field("history", &self.history)
            .finish()
    }
}

impl<B: TextBuffer> EditSession<B> {
    /// Create a session over `buffer` with default history limits.
    #[must_use]
    pub fn new(buffer: B) -> Self {
        Self::with_config(buffer, HistoryConfig::default())
    }

    /// Create a session over `buffer` with custom history limits.
    #[must_use]
    pub fn with_config(buffer: B, config: HistoryConfig) -> Self {
        Self {
            buffer,
            history: EditHistory::new(config),
        }
    }

    /// Insert `text` at `offset`.
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        self.splice(offset, offset, text)
    }

    /// Delete the characters in `[start, end)`.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<(), EditError> {
        self.splice(start, end, "")
    }

    /// Replace the characters in `[start, end)` with `text`.
    ///
    /// Captured as one logical operation: a single undo reverts both the
    /// removal and the insertion.
    pub fn replace(&mut self, start: usize, end: usize, text: &str) -> Result<(), EditError> {
        self.splice(start, end, text)
    }

    /// Reverse the most recent logical operation. No-op without history.
    pub fn undo(&mut self) {
        self.history.undo(&mut self.buffer);
    }

    /// Reapply the most recently undone operation. No-op without history.
    pub fn redo(&mut self) {
        self.history.redo(&mut self.buffer);
    }

    /// Discard all recorded history. The buffer content is unaffected.
    pub fn clear_history(&mut self) {
        self.history.clear_history();
    }

    /// Read access to the underlying buffer.
    #[must_use]
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// The attached history engine.
    #[must_use]
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// The entire buffer content.
    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Take the session apart, dropping the history.
    #[must_use]
    pub fn into_buffer(self) -> B {
        self.buffer
    }

    /// Validate, notify, and apply one delete+insert splice.
    fn splice(&mut self, start: usize, end: usize, text: &str) -> Result<(), EditError> {
        if start > end {
            return Err(EditError::InvertedRange { start, end });
        }
        let len = self.buffer.len_chars();
        if end > len {
            return Err(EditError::OutOfBounds { start, end, len });
        }
        let removed = end - start;
        let inserted = text.chars().count();
        if removed == 0 && inserted == 0 {
            return Ok(());
        }

        self.history
            .on_before_change(&self.buffer, start, removed, inserted);
        if removed > 0 {
            self.buffer.delete(start, end);
        }
        if inserted > 0 {
            self.buffer.insert(start, text);
        }
        self.buffer.set_cursor(start.saturating_add(inserted));
        self.history
            .on_after_change(&self.buffer, start, removed, inserted);
        Ok(())
    }
}
