#![forbid(unsafe_code)]

//! Capture, stacks, and traversal for the undo/redo engine.
//!
//! [`EditHistory`] owns the two action stacks and everything that moves
//! actions between them:
//!
//! - **Change capture**: [`on_before_change`](EditHistory::on_before_change)
//!   and [`on_after_change`](EditHistory::on_after_change) translate raw
//!   buffer deltas into [`EditAction`]s.
//! - **Grouping**: the delete and insert halves of a replace share a
//!   [`GroupId`] and traverse as one logical operation.
//! - **Traversal**: [`undo`](EditHistory::undo) and
//!   [`redo`](EditHistory::redo) pop one action, rewrite the buffer under
//!   the capture gate, and keep going while the next action on the stack
//!   belongs to the same group.
//! - **Limits**: the oldest groups are evicted once depth or byte budgets
//!   are exceeded.
//!
//! ```text
//!  host edit ──► capture ──►┌──────────────┐   undo()  ┌──────────────┐
//!                           │  undo stack  │ ────────► │  redo stack  │
//!                           │  (applied)   │ ◄──────── │  (reverted)  │
//!                           └──────────────┘   redo()  └──────────────┘
//!                                  ▲                          │
//!                                  └── any new capture clears ┘
//! ```
//!
//! # Invariants
//!
//! 1. Every action on the undo stack is currently applied to the buffer;
//!    every action on the redo stack is currently absent from it.
//! 2. Capturing a new action clears the redo stack (linear history, no
//!    branching timeline).
//! 3. Actions sharing a group are adjacent on their stack and move together;
//!    eviction never splits a group.
//! 4. `memory_usage()` equals the sum of `size_bytes()` over both stacks.
//! 5. The group counter only moves forward, once per logical operation.
//!
//! # Memory model
//!
//! Actions live in `VecDeque`s with the newest at the back, so capture and
//! traversal touch only the back while eviction pops whole groups off the
//! front. Byte accounting uses each action's
//! [`size_bytes`](EditAction::size_bytes).

use std::collections::VecDeque;
use std::fmt;

use rewind_core::TextBuffer;

use crate::action::{EditAction, EditKind, GroupId};
use crate::gate::{CaptureGate, SuppressionScope};

/// Configuration for history limits.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Maximum number of actions kept on the undo stack.
    ///
    /// The newest group is always kept whole, even when it alone exceeds
    /// this count.
    pub max_depth: usize,
    /// Maximum total bytes of recorded actions (0 = unlimited).
    pub max_bytes: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: 100,
            max_bytes: 10 * 1024 * 1024, // 10 MB
        }
    }
}

impl HistoryConfig {
    /// Create a configuration with custom limits.
    #[must_use]
    pub fn new(max_depth: usize, max_bytes: usize) -> Self {
        Self {
            max_depth,
            max_bytes,
        }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
            max_bytes: 0,
        }
    }
}

/// The undo/redo engine.
///
/// `EditHistory` does not own a buffer. The host funnels every edit through
/// the two capture hooks and passes its buffer in when undoing or redoing,
/// so one engine can follow a buffer wherever the host keeps it. See
/// [`EditSession`](crate::session::EditSession) for ready-made wiring.
///
/// The capture protocol is strict about ordering:
///
/// 1. [`on_before_change`](Self::on_before_change) fires with the buffer
///    still in its pre-mutation state and records what is about to be
///    removed.
/// 2. The host mutates the buffer.
/// 3. [`on_after_change`](Self::on_after_change) fires with the buffer in
///    its post-mutation state and records what was inserted.
///
/// A mutation that removes and inserts (a replace) therefore captures two
/// actions, and the second joins the group the first opened.
pub struct EditHistory {
    undo_stack: VecDeque<EditAction>,
    redo_stack: VecDeque<EditAction>,
    gate: CaptureGate,
    group_counter: u64,
    config: HistoryConfig,
    total_bytes: usize,
}

impl fmt::Debug for EditHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditHistory")
            .field("undo_depth", &self.undo_stack.len())
            .field("redo_depth", &self.redo_stack.len())
            .field("group_counter", &self.group_counter)
            .field("total_bytes", &self.total_bytes)
            .field("config", &self.config)
            .finish()
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl EditHistory {
    /// Create an empty history with the given limits.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            gate: CaptureGate::new(),
            group_counter: 0,
            config,
            total_bytes: 0,
        }
    }

    // ==== Change capture ====

    /// Record the text a mutation is about to remove.
    ///
    /// Must be called before the mutation, with `buffer` still in its
    /// pre-mutation state: `removed` characters are about to be removed at
    /// `start`, and the same mutation will insert `inserted_after`
    /// characters there (0 for a pure deletion).
    ///
    /// Captures a deletion action and opens a new group for it. The restored
    /// span is extended over the removed characters when a selection was
    /// removed (`removed > 1`) or a single character is being overwritten
    /// (`removed == 1 && inserted_after == 1`), so undo can highlight it.
    ///
    /// No-op while the capture gate is suppressed and when `removed == 0`.
    /// A span that does not fit the buffer is dropped without recording and
    /// without advancing the group counter.
    pub fn on_before_change<B>(
        &mut self,
        buffer: &B,
        start: usize,
        removed: usize,
        inserted_after: usize,
    ) where
        B: TextBuffer + ?Sized,
    {
        if self.gate.is_suppressed() || removed == 0 {
            return;
        }
        let Some(end) = start.checked_add(removed) else {
            tracing::warn!(
                target: "rewind.capture",
                start,
                removed,
                "dropping deletion with overflowing span"
            );
            return;
        };
        if end > buffer.len_chars() {
            tracing::warn!(
                target: "rewind.capture",
                start,
                removed,
                len = buffer.len_chars(),
                "dropping out-of-range deletion"
            );
            return;
        }

        let mut action =
            EditAction::new(buffer.slice(start, end), start, EditKind::Delete, self.next_group());
        if removed > 1 || (removed == 1 && inserted_after == 1) {
            action = action.with_selection_span(removed);
        }
        tracing::debug!(
            target: "rewind.capture",
            group = action.group().raw(),
            start,
            chars = removed,
            "captured deletion"
        );
        self.push_captured(action);
    }

    /// Record the text a mutation has just inserted.
    ///
    /// Must be called after the mutation, with `buffer` in its post-mutation
    /// state: `inserted` characters now sit at `start`, and the same
    /// mutation removed `removed_before` characters there (as reported to
    /// [`on_before_change`](Self::on_before_change), 0 for a pure
    /// insertion).
    ///
    /// When `removed_before > 0` the insertion is the second half of a
    /// replace and joins the current group instead of opening a new one.
    ///
    /// No-op while the capture gate is suppressed and when `inserted == 0`.
    /// A span that does not fit the buffer is dropped without recording.
    pub fn on_after_change<B>(
        &mut self,
        buffer: &B,
        start: usize,
        removed_before: usize,
        inserted: usize,
    ) where
        B: TextBuffer + ?Sized,
    {
        if self.gate.is_suppressed() || inserted == 0 {
            return;
        }
        let Some(end) = start.checked_add(inserted) else {
            tracing::warn!(
                target: "rewind.capture",
                start,
                inserted,
                "dropping insertion with overflowing span"
            );
            return;
        };
        if end > buffer.len_chars() {
            tracing::warn!(
                target: "rewind.capture",
                start,
                inserted,
                len = buffer.len_chars(),
                "dropping out-of-range insertion"
            );
            return;
        }

        let group = if removed_before > 0 {
            self.current_group()
        } else {
            self.next_group()
        };
        let action = EditAction::new(buffer.slice(start, end), start, EditKind::Insert, group);
        tracing::debug!(
            target: "rewind.capture",
            group = group.raw(),
            start,
            chars = inserted,
            joined = removed_before > 0,
            "captured insertion"
        );
        self.push_captured(action);
    }

    fn push_captured(&mut self, action: EditAction) {
        self.clear_redo();
        self.total_bytes += action.size_bytes();
        self.undo_stack.push_back(action);
        self.enforce_limits();
    }

    fn next_group(&mut self) -> GroupId {
        self.group_counter += 1;
        GroupId::new(self.group_counter)
    }

    fn current_group(&self) -> GroupId {
        GroupId::new(self.group_counter)
    }

    // ==== Undo / redo ====

    /// Reverse the most recent logical operation.
    ///
    /// Pops the top action, applies its opposite to `buffer`, restores the
    /// recorded cursor or selection, and repeats while the next action on
    /// the undo stack belongs to the same group, so a replace reverts in one
    /// call. No-op when the undo stack is empty.
    ///
    /// Capture stays suppressed for the whole traversal; the host may keep
    /// firing change notifications for the engine's own mutations.
    ///
    /// An action whose span no longer fits the buffer is discarded with a
    /// warning instead of applied, and the rest of its group is left in
    /// place.
    pub fn undo<B>(&mut self, buffer: &mut B)
    where
        B: TextBuffer + ?Sized,
    {
        let Some(first) = self.undo_stack.pop_back() else {
            return;
        };
        let group = first.group();
        let _scope = self.suppress_capture();

        let mut action = first;
        loop {
            if !revert(buffer, &action) {
                self.total_bytes = self.total_bytes.saturating_sub(action.size_bytes());
                break;
            }
            tracing::trace!(
                target: "rewind.replay",
                group = group.raw(),
                start = action.start(),
                insertion = action.is_insertion(),
                "undid action"
            );
            self.redo_stack.push_back(action);
            match pop_if_group(&mut self.undo_stack, group) {
                Some(next) => action = next,
                None => break,
            }
        }
    }

    /// Reapply the most recently undone logical operation.
    ///
    /// The mirror of [`undo`](Self::undo): pops the top of the redo stack,
    /// applies the action forward, and continues through the rest of its
    /// group. No-op when the redo stack is empty.
    pub fn redo<B>(&mut self, buffer: &mut B)
    where
        B: TextBuffer + ?Sized,
    {
        let Some(first) = self.redo_stack.pop_back() else {
            return;
        };
        let group = first.group();
        let _scope = self.suppress_capture();

        let mut action = first;
        loop {
            if !reapply(buffer, &action) {
                self.total_bytes = self.total_bytes.saturating_sub(action.size_bytes());
                break;
            }
            tracing::trace!(
                target: "rewind.replay",
                group = group.raw(),
                start = action.start(),
                insertion = action.is_insertion(),
                "redid action"
            );
            self.undo_stack.push_back(action);
            match pop_if_group(&mut self.redo_stack, group) {
                Some(next) => action = next,
                None => break,
            }
        }
    }

    /// Suppress capture for as long as the returned scope lives.
    ///
    /// Equivalent to `capture_gate().suppress()`; exposed here so hosts can
    /// wrap programmatic edits without cloning a gate handle first.
    #[must_use]
    pub fn suppress_capture(&self) -> SuppressionScope {
        self.gate.suppress()
    }

    // ==== Queries ====

    /// `true` when at least one operation can be undone.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// `true` when at least one operation can be redone.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of actions on the undo stack.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of actions on the redo stack.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Total bytes held by recorded actions, across both stacks.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.total_bytes
    }

    /// The configured limits.
    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Get a shared handle to the capture-suppression flag.
    #[must_use]
    pub fn capture_gate(&self) -> CaptureGate {
        self.gate.clone()
    }

    /// The action the next [`undo`](Self::undo) would revert first.
    #[must_use]
    pub fn next_undo_action(&self) -> Option<&EditAction> {
        self.undo_stack.back()
    }

    /// The action the next [`redo`](Self::redo) would reapply first.
    #[must_use]
    pub fn next_redo_action(&self) -> Option<&EditAction> {
        self.redo_stack.back()
    }

    /// Up to `limit` undo-stack actions, newest first.
    #[must_use]
    pub fn undo_actions(&self, limit: usize) -> Vec<&EditAction> {
        self.undo_stack.iter().rev().take(limit).collect()
    }

    /// Up to `limit` redo-stack actions, next-to-reapply first.
    #[must_use]
    pub fn redo_actions(&self, limit: usize) -> Vec<&EditAction> {
        self.redo_stack.iter().rev().take(limit).collect()
    }

    // ==== Maintenance ====

    /// Discard all recorded history, both undo and redo.
    ///
    /// Irrecoverable; the live buffer is not touched. The group counter
    /// keeps its value, since only equality between adjacent actions is
    /// meaningful.
    pub fn clear_history(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.total_bytes = 0;
        tracing::debug!(target: "rewind.capture", "history cleared");
    }

    fn clear_redo(&mut self) {
        for action in self.redo_stack.drain(..) {
            self.total_bytes = self.total_bytes.saturating_sub(action.size_bytes());
        }
    }

    fn enforce_limits(&mut self) {
        while self.undo_stack.len() > self.config.max_depth && !self.only_newest_group_left() {
            self.evict_oldest_group();
        }
        if self.config.max_bytes > 0 {
            while self.total_bytes > self.config.max_bytes && !self.only_newest_group_left() {
                self.evict_oldest_group();
            }
        }
    }

    /// `true` when the whole undo stack is one group (or empty). That group
    /// is never evicted, so a single oversized operation stays undoable.
    fn only_newest_group_left(&self) -> bool {
        match (self.undo_stack.front(), self.undo_stack.back()) {
            (Some(oldest), Some(newest)) => oldest.group() == newest.group(),
            _ => true,
        }
    }

    fn evict_oldest_group(&mut self) {
        let Some(group) = self.undo_stack.front().map(EditAction::group) else {
            return;
        };
        let mut evicted = 0usize;
        while self
            .undo_stack
            .front()
            .is_some_and(|action| action.group() == group)
        {
            if let Some(action) = self.undo_stack.pop_front() {
                self.total_bytes = self.total_bytes.saturating_sub(action.size_bytes());
                evicted += 1;
            }
        }
        tracing::debug!(
            target: "rewind.capture",
            group = group.raw(),
            actions = evicted,
            "evicted oldest group over history limits"
        );
    }
}

/// Apply the opposite of `action`: recorded insertions are removed from the
/// buffer, recorded deletions are restored into it.
fn revert<B: TextBuffer + ?Sized>(buffer: &mut B, action: &EditAction) -> bool {
    match action.kind() {
        EditKind::Insert => remove_recorded(buffer, action),
        EditKind::Delete => restore_recorded(buffer, action),
    }
}

/// Apply `action` forward again: recorded insertions are re-inserted,
/// recorded deletions are re-removed.
fn reapply<B: TextBuffer + ?Sized>(buffer: &mut B, action: &EditAction) -> bool {
    match action.kind() {
        EditKind::Insert => restore_recorded(buffer, action),
        EditKind::Delete => remove_recorded(buffer, action),
    }
}

/// Delete the recorded content span and collapse the cursor to its start.
///
/// Returns `false`, leaving the buffer untouched, when the span no longer
/// fits the buffer.
fn remove_recorded<B: TextBuffer + ?Sized>(buffer: &mut B, action: &EditAction) -> bool {
    let chars = action.char_len();
    let end = match action.start().checked_add(chars) {
        Some(end) if end <= buffer.len_chars() => end,
        _ => {
            tracing::warn!(
                target: "rewind.replay",
                group = action.group().raw(),
                start = action.start(),
                chars,
                len = buffer.len_chars(),
                "discarding action outside buffer bounds"
            );
            return false;
        }
    };
    buffer.delete(action.start(), end);
    buffer.set_cursor(action.start());
    true
}

/// Insert the recorded content back and restore the recorded cursor or
/// selection span.
fn restore_recorded<B: TextBuffer + ?Sized>(buffer: &mut B, action: &EditAction) -> bool {
    if action.start() > buffer.len_chars() {
        tracing::warn!(
            target: "rewind.replay",
            group = action.group().raw(),
            start = action.start(),
            len = buffer.len_chars(),
            "discarding action outside buffer bounds"
        );
        return false;
    }
    buffer.insert(action.start(), action.content());
    if action.end() == action.start() {
        buffer.set_cursor(action.start().saturating_add(action.char_len()));
    } else {
        buffer.set_selection(action.start(), action.end());
    }
    true
}

fn pop_if_group(stack: &mut VecDeque<EditAction>, group: GroupId) -> Option<EditAction> {
    if stack.back().is_some_and(|action| action.group() == group) {
        stack.pop_back()
    } else {
        None
    }
}
