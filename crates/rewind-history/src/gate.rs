#![forbid(unsafe_code)]

//! Capture suppression for engine-originated mutations.
//!
//! While the engine rewrites the buffer during undo or redo, a host keeps
//! firing its change notifications. [`CaptureGate`] is the flag that tells
//! the capture hooks to ignore those echoes, and [`SuppressionScope`] is the
//! guard that restores the flag on every exit path, including an unwind out
//! of a panicking buffer implementation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared handle to the capture-suppression flag.
///
/// The gate is a flag, not a lock: the engine is single-threaded and only
/// toggles it around its own buffer mutations. Handles are cheap to clone,
/// so host wiring can hold one and consult
/// [`is_suppressed`](Self::is_suppressed) before echoing buffer deltas back
/// into the capture hooks.
///
/// # Example
///
/// ```
/// use rewind_history::CaptureGate;
///
/// let gate = CaptureGate::new();
/// assert!(!gate.is_suppressed());
/// {
///     let _scope = gate.suppress();
///     assert!(gate.is_suppressed());
/// }
/// assert!(!gate.is_suppressed());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CaptureGate {
    suppressed: Arc<AtomicBool>,
}

impl CaptureGate {
    /// Create a new gate with capture enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while the engine (or a host scope) is the author of buffer
    /// mutations and capture must not record them.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed.load(Ordering::Relaxed)
    }

    /// Suppress capture until the returned scope is dropped.
    ///
    /// Scopes nest: each one restores the value the flag had when it was
    /// acquired. Hosts use this to apply programmatic edits that must not
    /// enter history.
    #[must_use]
    pub fn suppress(&self) -> SuppressionScope {
        let prev = self.suppressed.swap(true, Ordering::Relaxed);
        SuppressionScope {
            gate: self.clone(),
            prev,
        }
    }
}

/// Guard returned by [`CaptureGate::suppress`].
///
/// Dropping it restores the suppression state the gate had when the scope was
/// acquired, so nested scopes unwind correctly.
#[must_use = "capture is re-enabled as soon as the scope is dropped"]
#[derive(Debug)]
pub struct SuppressionScope {
    gate: CaptureGate,
    prev: bool,
}

impl Drop for SuppressionScope {
    fn drop(&mut self) {
        self.gate.suppressed.store(self.prev, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_gate_is_open() {
        assert!(!CaptureGate::new().is_suppressed());
    }

    #[test]
    fn scope_suppresses_until_dropped() {
        let gate = CaptureGate::new();
        let scope = gate.suppress();
        assert!(gate.is_suppressed());
        drop(scope);
        assert!(!gate.is_suppressed());
    }

    #[test]
    fn nested_scopes_restore_in_order() {
        let gate = CaptureGate::new();
        let outer = gate.suppress();
        {
            let inner = gate.suppress();
            assert!(gate.is_suppressed());
            drop(inner);
        }
        assert!(gate.is_suppressed());
        drop(outer);
        assert!(!gate.is_suppressed());
    }

    #[test]
    fn clones_share_the_flag() {
        let gate = CaptureGate::new();
        let handle = gate.clone();
        let _scope = gate.suppress();
        assert!(handle.is_suppressed());
    }
}
