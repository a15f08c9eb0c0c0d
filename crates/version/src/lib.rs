//! Version tokens, resolution, and gate decisions
//!
//! Leaf crate for everything version-keyed in the harness:
//!
//! - [`PgVersion`]: the closed set of supported server major versions plus
//!   a not-set sentinel, with a priority-ordered fuzzy parser.
//! - [`resolve`] / [`resolve_from_env`]: effective-version resolution from an
//!   environment snapshot against the compiled default.
//! - [`VersionGate`]: pure skip/xfail/run-only-on-default predicates yielding
//!   framework-agnostic [`GateDecision`] pairs.

pub mod gate;
pub mod pg_version;
pub mod resolve;

pub use gate::{GateDecision, VersionGate};
pub use pg_version::{InvalidVersion, PgVersion};
pub use resolve::{resolve, resolve_from_env, DEFAULT_PG_VERSION_VAR};
