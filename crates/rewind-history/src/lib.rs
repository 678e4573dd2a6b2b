#![forbid(unsafe_code)]

//! Undo/redo history engine for character-indexed text buffers.
//!
//! The engine never owns the text it protects. A host reports every buffer
//! mutation through a pair of before/after hooks; the engine snapshots the
//! affected characters into reversible [`EditAction`]s, stacks them, and
//! rewrites the host's buffer when asked to undo or redo.
//!
//! # Architecture
//!
//! ```text
//!  host edit
//!     │  on_before_change      (what is about to be removed)
//!     │  mutation
//!     │  on_after_change       (what was just inserted)
//!     ▼
//!  ┌─────────────┐   undo()   ┌─────────────┐
//!  │ undo stack  │ ─────────► │ redo stack  │
//!  │             │ ◄───────── │             │
//!  └─────────────┘   redo()   └─────────────┘
//! ```
//!
//! A replace captures two actions (its deletion and its insertion) under one
//! [`GroupId`]; traversal walks a whole group per call, so the pair reverts
//! and reapplies atomically. Capturing any new action clears the redo stack:
//! history is linear, never a tree.
//!
//! While the engine rewrites the buffer, the host's change notifications
//! keep firing. The [`CaptureGate`] suppresses capture for the duration so
//! the engine's own edits never re-enter history.
//!
//! # Quick start
//!
//! [`EditSession`] bundles a buffer with an engine and does the hook wiring:
//!
//! ```
//! use rewind_core::RopeBuffer;
//! use rewind_history::EditSession;
//!
//! let mut session = EditSession::new(RopeBuffer::from_text("hello"));
//! session.insert(5, " world")?;
//! assert_eq!(session.text(), "hello world");
//!
//! session.undo();
//! assert_eq!(session.text(), "hello");
//! session.redo();
//! assert_eq!(session.text(), "hello world");
//! # Ok::<(), rewind_history::EditError>(())
//! ```
//!
//! Hosts with their own storage implement
//! [`TextBuffer`](rewind_core::TextBuffer) and either reuse `EditSession`
//! or call the hooks on [`EditHistory`] directly.
//!
//! # Design notes
//!
//! - Offsets are characters, not bytes; ranges are half-open `[start, end)`.
//! - History is bounded by [`HistoryConfig`] (action count and bytes);
//!   eviction removes the oldest groups whole.
//! - An action whose span no longer fits the buffer is discarded with a
//!   warning rather than applied, so a desynchronized host degrades to lost
//!   history instead of corrupted text.

/// Reversible edit actions and group ids.
pub mod action;
/// Capture suppression gate and scope guard.
pub mod gate;
/// The engine: capture hooks, stacks, traversal, limits.
pub mod history;
/// Buffer-plus-history wiring for hosts without their own.
pub mod session;

pub use action::{EditAction, EditKind, GroupId};
pub use gate::{CaptureGate, SuppressionScope};
pub use history::{EditHistory, HistoryConfig};
pub use session::{EditError, EditSession};
