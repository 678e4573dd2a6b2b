#![forbid(unsafe_code)]

//! Reversible edit actions.
//!
//! An [`EditAction`] records one atomic buffer mutation: the exact characters
//! that were inserted or removed, where, and the selection span to restore
//! when the mutation is undone. Actions are created by the capture hooks in
//! [`history`](crate::history) and never modified once pushed; undo and redo
//! move them between stacks without rewriting them.

use std::fmt;

/// Identifier for one logical user operation.
///
/// Adjacent actions on a stack that carry the same `GroupId` are undone and
/// redone together in a single call; this is how the delete and insert halves
/// of a replace stay atomic. Ids come from a per-engine counter that only
/// increases, so only equality between stack neighbours is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl GroupId {
    /// Create a group id from a raw counter value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw counter value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which direction of mutation an action records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// The recorded characters were added to the buffer.
    Insert,
    /// The recorded characters were removed from the buffer.
    Delete,
}

/// One recorded, reversible text mutation.
///
/// The content snapshot is taken at capture time and never re-derived from
/// the buffer, so an action stays replayable even after the buffer has moved
/// on. `start` and `end` hold the selection span to restore after undoing a
/// deletion; for every other action they are equal and the cursor collapses
/// to a caret instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAction {
    content: String,
    start: usize,
    end: usize,
    kind: EditKind,
    group: GroupId,
}

impl EditAction {
    pub(crate) fn new(content: String, start: usize, kind: EditKind, group: GroupId) -> Self {
        Self {
            content,
            start,
            end: start,
            kind,
            group,
        }
    }

    /// Extend the restored span to cover `count` characters from `start`.
    ///
    /// Applied when a deletion removed a selection, or removed the single
    /// character a one-for-one replace is about to overwrite, so undo can
    /// highlight what was there.
    pub(crate) fn with_selection_span(mut self, count: usize) -> Self {
        self.end = self.start.saturating_add(count);
        self
    }

    /// The exact characters that were inserted or removed.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Char offset where the mutation occurred.
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// End of the selection span to restore after undoing a deletion.
    ///
    /// Equal to [`start`](Self::start) unless the deletion removed a span.
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    /// Whether this action records an insertion or a deletion.
    #[must_use]
    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// `true` if this action records characters that were added.
    #[must_use]
    pub fn is_insertion(&self) -> bool {
        self.kind == EditKind::Insert
    }

    /// The logical operation this action belongs to.
    #[must_use]
    pub fn group(&self) -> GroupId {
        self.group
    }

    /// Length of the recorded content in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    /// Approximate size of this action in bytes, for history budgeting.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of::<Self>() + self.content.len()
    }
}
