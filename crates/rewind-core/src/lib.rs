#![forbid(unsafe_code)]

//! Buffer surface shared by the rewind history engine and its hosts.
//!
//! # Role in rewind
//!
//! The history engine in `rewind-history` never owns the text it protects; it
//! drives whatever the host hands it through the [`TextBuffer`] trait. This
//! crate is that shared vocabulary, kept free of any history machinery so a
//! host can depend on it without pulling in the engine.
//!
//! # This crate provides
//!
//! - [`TextBuffer`]: character-indexed read/write access plus cursor and
//!   selection placement, the full surface the engine needs to capture and
//!   replay edits.
//! - [`Selection`]: an ordered char-offset span; a caret is a collapsed span.
//! - [`RopeBuffer`]: a rope-backed reference implementation with clamping
//!   semantics, used by the engine's own tests and by hosts that do not bring
//!   their own storage.
//!
//! # Conventions
//!
//! All offsets are counted in characters (Unicode scalar values), never
//! bytes. Ranges are half-open: `[start, end)`. Implementations clamp
//! out-of-range input instead of panicking.

/// The text-buffer trait the history engine drives.
pub mod buffer;
/// Rope-backed reference buffer.
pub mod rope;
/// Cursor and selection spans.
pub mod selection;

pub use buffer::TextBuffer;
pub use rope::RopeBuffer;
pub use selection::Selection;
