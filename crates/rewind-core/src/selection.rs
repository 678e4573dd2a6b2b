#![forbid(unsafe_code)]

//! Selection spans over a character-indexed buffer.

/// An ordered span of character offsets used for cursor and selection state.
///
/// A caret (collapsed cursor) is a span whose start and end are equal. The
/// constructors keep the span ordered, so `start() <= end()` always holds.
/// Like every range in this workspace the span is half-open: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    /// Create a collapsed selection (a caret) at `offset`.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Create a selection covering `[a, b)`, reordering if `a > b`.
    #[must_use]
    pub const fn span(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// Number of characters covered.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// `true` when the span covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// `true` when the selection is a collapsed caret.
    #[must_use]
    pub const fn is_caret(&self) -> bool {
        self.is_empty()
    }

    /// Clamp both offsets to at most `len`.
    #[must_use]
    pub fn clamped(self, len: usize) -> Self {
        Self {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }
}
