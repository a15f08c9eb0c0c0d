//! Effective-version resolution
//!
//! The resolver is a pure function over an environment snapshot: callers
//! hand in the override value (if any) and get back the effective version.
//! Nothing here reads mutable process state, so behavior is reproducible
//! and testable without touching the real environment.

use crate::pg_version::{InvalidVersion, PgVersion};

/// Environment variable consulted for the version override.
pub const DEFAULT_PG_VERSION_VAR: &str = "DEFAULT_PG_VERSION";

/// Resolve the effective version from an optional override.
///
/// A present override must parse; an unparseable override is a fatal
/// configuration error, never silently replaced by the default. An absent
/// override yields [`PgVersion::DEFAULT`].
pub fn resolve(env_override: Option<&str>) -> Result<PgVersion, InvalidVersion> {
    match env_override {
        Some(raw) => raw.parse(),
        None => Ok(PgVersion::DEFAULT),
    }
}

/// Snapshot `DEFAULT_PG_VERSION` and resolve.
///
/// Thin adapter over [`resolve`]; the snapshot is taken fresh on every call.
pub fn resolve_from_env() -> Result<PgVersion, InvalidVersion> {
    let snapshot = std::env::var(DEFAULT_PG_VERSION_VAR).ok();
    resolve(snapshot.as_deref())
}
