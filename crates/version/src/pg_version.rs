//! Postgres major-version tokens
//!
//! Every supported server major version is identified by a canonical
//! two-character token (`"14"` … `"17"`). Inputs arrive in several shapes:
//! the bare token, a `v`-prefixed form used by CI workflows (`"v14"`), or a
//! full server-version integer (`"150002"`). Parsing normalizes all of them
//! into the closed [`PgVersion`] enum; anything else is an explicit
//! [`InvalidVersion`] error, never a silent fallback.
//!
//! ## Parsing rules (priority order)
//!
//! 1. Exact match against a canonical token.
//! 2. Case-insensitive `v` prefix followed by a canonical token.
//! 3. All-digit string of length ≥ 2 whose first two characters are a
//!    canonical token.
//! 4. Anything else fails.
//!
//! The [`PgVersion::NotSet`] sentinel stands for "no explicit version
//! requested" and is never produced by parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A supported Postgres major version, or the not-set sentinel.
///
/// Variants compare by canonical token. `Display` yields the bare token
/// (safe for logs and command-line values); use [`PgVersion::v_prefixed`]
/// where the `v`-prefixed convention is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PgVersion {
    /// Postgres 14
    #[serde(rename = "14")]
    V14,
    /// Postgres 15
    #[serde(rename = "15")]
    V15,
    /// Postgres 16
    #[serde(rename = "16")]
    V16,
    /// Postgres 17
    #[serde(rename = "17")]
    V17,
    /// No explicit version requested; callers fall back to the server default.
    ///
    /// Never produced by parsing, and its token never equals a real one.
    #[serde(rename = "<version not set>")]
    NotSet,
}

/// Canonical token table, in ascending version order.
///
/// Parsing is table-driven: every rule resolves against this list, so adding
/// a version is a single-entry change.
const KNOWN_VERSIONS: [(&str, PgVersion); 4] = [
    ("14", PgVersion::V14),
    ("15", PgVersion::V15),
    ("16", PgVersion::V16),
    ("17", PgVersion::V17),
];

/// Error returned when an input string matches no parsing rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Postgres version: {input:?}")]
pub struct InvalidVersion {
    /// The rejected input, verbatim.
    pub input: String,
}

impl PgVersion {
    /// Compiled default server version.
    pub const DEFAULT: PgVersion = PgVersion::V16;

    /// The canonical token (`"14"` … `"17"`), or the sentinel placeholder.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PgVersion::V14 => "14",
            PgVersion::V15 => "15",
            PgVersion::V16 => "16",
            PgVersion::V17 => "17",
            PgVersion::NotSet => "<version not set>",
        }
    }

    /// The `v`-prefixed form (`"v14"`) used by CI workflows.
    pub fn v_prefixed(&self) -> String {
        format!("v{}", self.as_str())
    }

    /// All real versions, in ascending order. Excludes the sentinel.
    pub fn all() -> impl Iterator<Item = PgVersion> {
        KNOWN_VERSIONS.iter().map(|&(_, v)| v)
    }
}

impl fmt::Display for PgVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PgVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Rule 1: exact canonical token.
        if let Some(v) = lookup(s) {
            return Ok(v);
        }

        // Rule 2: case-insensitive `v` prefix followed by a canonical token.
        if let Some(rest) = s.strip_prefix('v').or_else(|| s.strip_prefix('V')) {
            if let Some(v) = lookup(rest) {
                return Ok(v);
            }
        }

        // Rule 3: all-digit string of length >= 2; the first two characters
        // carry the major version ("150002" -> 15).
        if s.len() >= 2 && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Some(v) = lookup(&s[..2]) {
                return Ok(v);
            }
        }

        Err(InvalidVersion {
            input: s.to_string(),
        })
    }
}

fn lookup(token: &str) -> Option<PgVersion> {
    KNOWN_VERSIONS
        .iter()
        .find(|&&(t, _)| t == token)
        .map(|&(_, v)| v)
}
