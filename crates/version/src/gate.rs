//! Version-keyed gate decisions
//!
//! Tests gate themselves on the resolved server version: skip on a version
//! known to lack a feature, expect failure on a version with a known bug, or
//! run only against the default version. The decision logic lives here as
//! pure predicates; the surrounding test framework adapts each
//! [`GateDecision`] into its own skip/expected-failure mechanism.

use crate::pg_version::{InvalidVersion, PgVersion};
use crate::resolve::resolve_from_env;

/// A computed gating decision, ready for a test framework to act on.
///
/// `active == true` means the gate fires (skip the test, or mark it as
/// expected to fail, depending on which predicate produced it). The reason
/// travels along so frameworks can report why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether the gate fires.
    pub active: bool,
    /// Human-readable justification, passed through to the framework.
    pub reason: String,
}

impl GateDecision {
    fn new(active: bool, reason: impl Into<String>) -> Self {
        GateDecision {
            active,
            reason: reason.into(),
        }
    }
}

/// Gate predicates bound to a resolved version.
///
/// Deterministic and side-effect-free: every decision is a function of the
/// resolved version captured at construction and the caller-supplied target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionGate {
    resolved: PgVersion,
}

impl VersionGate {
    /// Bind the predicates to an explicitly resolved version.
    pub fn new(resolved: PgVersion) -> Self {
        VersionGate { resolved }
    }

    /// Bind the predicates to the environment-resolved version.
    ///
    /// An invalid `DEFAULT_PG_VERSION` propagates as a fatal configuration
    /// error.
    pub fn from_env() -> Result<Self, InvalidVersion> {
        Ok(VersionGate {
            resolved: resolve_from_env()?,
        })
    }

    /// The version the predicates are bound to.
    pub fn resolved(&self) -> PgVersion {
        self.resolved
    }

    /// Skip when running against `target`.
    pub fn skip_on(&self, target: PgVersion, reason: impl Into<String>) -> GateDecision {
        GateDecision::new(self.resolved == target, reason)
    }

    /// Expect failure when running against `target`.
    ///
    /// Same predicate as [`VersionGate::skip_on`]; the downstream action
    /// (xfail instead of skip) is the framework's business.
    pub fn xfail_on(&self, target: PgVersion, reason: impl Into<String>) -> GateDecision {
        GateDecision::new(self.resolved == target, reason)
    }

    /// Skip whenever the resolved version is not the compiled default.
    pub fn run_only_on_default(&self, reason: impl Into<String>) -> GateDecision {
        GateDecision::new(self.resolved != PgVersion::DEFAULT, reason)
    }
}
