//! Error types for the acceptance harness
//!
//! One top-level enum per the harness boundary, with per-concern errors
//! nested via `#[from]`. Scenario failures are separated out so every
//! assertion failure names the invariant it violated.

use crate::latch::LatchViolation;
use crate::lsn::{InvalidLsn, Lsn};
use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Top-level harness error
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Version token or override rejected
    #[error("version error: {0}")]
    Version(#[from] auxgate_version::InvalidVersion),

    /// HTTP transport failure against the storage service
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage service answered with a non-success status
    #[error("storage api returned {status} for {url}: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Request URL
        url: String,
        /// Response body, verbatim
        body: String,
    },

    /// SQL failure on a compute endpoint
    #[error("sql error: {0}")]
    Sql(#[from] postgres::Error),

    /// A scalar query came back with no rows
    #[error("query {query:?} returned no result")]
    NoResult {
        /// The query that produced no rows
        query: String,
    },

    /// Statement issued against an endpoint that was already stopped
    #[error("compute endpoint is stopped")]
    EndpointStopped,

    /// Malformed log sequence number
    #[error("lsn error: {0}")]
    Lsn(#[from] InvalidLsn),

    /// I/O error (log files, state files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Acceptance-scenario assertion failure
    #[error("scenario failed: {0}")]
    Scenario(#[from] ScenarioError),
}

/// Fatal assertion failures inside the acceptance scenario
///
/// No local recovery and no retries; each variant reports which part of the
/// latch contract was broken.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The latch state model rejected an observation
    #[error("latch contract violated: {0}")]
    Latch(#[from] LatchViolation),

    /// The service log never showed the enabling marker
    #[error("service log does not contain marker {marker:?}")]
    MarkerMissing {
        /// The literal marker that was expected
        marker: String,
    },

    /// The subscriber never caught up to the publisher
    #[error("replication sync timed out after {elapsed:?} short of {target}")]
    SyncTimeout {
        /// Time spent waiting
        elapsed: Duration,
        /// Publisher flush position the subscriber had to reach
        target: Lsn,
    },
}
