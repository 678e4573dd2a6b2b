#![forbid(unsafe_code)]

//! The buffer surface the history engine drives.
//!
//! [`TextBuffer`] is the seam between the engine and whatever actually owns
//! the text. The engine reads through it when capturing edits (to snapshot
//! the characters an action covers) and writes through it when replaying
//! them (to splice content back and repark the cursor).

/// Character-indexed mutable text storage.
///
/// All offsets are in characters (Unicode scalar values), not bytes, and all
/// ranges are half-open `[start, end)`. Implementations must clamp
/// out-of-range input rather than panic: the engine validates the spans it
/// derives from history, but host notifications can carry arbitrary offsets.
pub trait TextBuffer {
    /// Number of characters in the buffer.
    fn len_chars(&self) -> usize;

    /// Extract the characters in `[start, end)` as an owned string.
    ///
    /// An empty or inverted range yields an empty string.
    fn slice(&self, start: usize, end: usize) -> String;

    /// Insert `text` so that its first character lands at `offset`.
    fn insert(&mut self, offset: usize, text: &str);

    /// Remove the characters in `[start, end)`.
    fn delete(&mut self, start: usize, end: usize);

    /// Collapse the cursor to a caret at `offset`.
    fn set_cursor(&mut self, offset: usize);

    /// Select the characters in `[start, end)`.
    fn set_selection(&mut self, start: usize, end: usize);

    /// `true` when the buffer holds no text.
    fn is_empty(&self) -> bool {
        self.len_chars() == 0
    }

    /// The entire buffer content as an owned string.
    fn text(&self) -> String {
        self.slice(0, self.len_chars())
    }
}
