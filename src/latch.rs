//! Aux-file latch state model
//!
//! The effective flag exposed in timeline detail is a one-way latch owned by
//! the storage service: created `Unset`, flipped to `Enabled` the first time
//! the write path processes data while the tenant toggle is on, and never
//! observed to go back. The harness does not own the flag; it folds the
//! observations it makes through a [`LatchObserver`], which rejects any
//! regression and labels every expectation with the invariant under test so
//! failures say exactly what broke.
//!
//! Transitions:
//!
//! ```text
//! Unset --(write path, toggle on)--> Enabled --(anything)--> Enabled
//! ```

use std::fmt;
use thiserror::Error;

/// Observable state of the per-timeline latch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchState {
    /// Initial state; the effective flag reads `false`
    Unset,
    /// Latched; the effective flag reads `true` and stays there
    Enabled,
}

impl LatchState {
    /// Map the effective flag from timeline detail into a state
    pub fn from_effective(flag: bool) -> Self {
        if flag {
            LatchState::Enabled
        } else {
            LatchState::Unset
        }
    }

    /// Whether this is the latched state
    pub fn is_enabled(&self) -> bool {
        matches!(self, LatchState::Enabled)
    }
}

impl fmt::Display for LatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatchState::Unset => f.write_str("unset"),
            LatchState::Enabled => f.write_str("enabled"),
        }
    }
}

/// Which part of the latch contract an assertion verifies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchInvariant {
    /// Enabling the toggle alone must not flip the latch
    Precondition,
    /// The first gated write must flip the latch
    Transition,
    /// Disabling the toggle afterwards must not unflip it
    Monotonicity,
    /// The latched state must survive a service restart
    Durability,
}

impl fmt::Display for LatchInvariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatchInvariant::Precondition => f.write_str("precondition"),
            LatchInvariant::Transition => f.write_str("transition"),
            LatchInvariant::Monotonicity => f.write_str("monotonicity"),
            LatchInvariant::Durability => f.write_str("durability"),
        }
    }
}

/// A broken latch contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatchViolation {
    /// An observation did not match the expected state
    #[error("{invariant} violated: expected {expected}, observed {actual}")]
    Mismatch {
        /// The invariant the assertion was verifying
        invariant: LatchInvariant,
        /// State the contract requires at this point
        expected: LatchState,
        /// State actually observed
        actual: LatchState,
    },

    /// The latch went backwards between two observations
    #[error("{invariant} check observed the latch regress from enabled to unset")]
    Regressed {
        /// The invariant being verified when the regression surfaced
        invariant: LatchInvariant,
    },
}

/// Folds successive effective-flag observations against the latch contract
///
/// The observer holds the last state seen. Regressions are rejected before
/// any expectation check, so a `true -> false` sequence fails no matter what
/// the caller expected.
#[derive(Debug, Default)]
pub struct LatchObserver {
    last: Option<LatchState>,
}

impl LatchObserver {
    /// Fresh observer with no observations yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one observation of the effective flag
    pub fn observe(
        &mut self,
        effective: bool,
        invariant: LatchInvariant,
    ) -> Result<LatchState, LatchViolation> {
        let state = LatchState::from_effective(effective);
        if self.last == Some(LatchState::Enabled) && state == LatchState::Unset {
            return Err(LatchViolation::Regressed { invariant });
        }
        self.last = Some(state);
        Ok(state)
    }

    /// Fold in an observation and require a specific state
    pub fn expect(
        &mut self,
        effective: bool,
        expected: LatchState,
        invariant: LatchInvariant,
    ) -> Result<(), LatchViolation> {
        let actual = self.observe(effective, invariant)?;
        if actual != expected {
            return Err(LatchViolation::Mismatch {
                invariant,
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// The last state observed, if any
    pub fn last(&self) -> Option<LatchState> {
        self.last
    }
}
