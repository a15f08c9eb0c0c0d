//! Auxgate - acceptance harness for the aux-file v2 latch
//!
//! Auxgate exercises a storage service's per-timeline aux-file latch from
//! the outside: it flips the tenant-level toggle, drives a logical
//! replication workload through compute endpoints, and asserts the latch's
//! precondition, transition, monotonicity, and durability through the
//! service's own HTTP control plane. Version-keyed test gating lives in the
//! [`version`] crate re-exported here.
//!
//! # Quick start
//!
//! ```ignore
//! use auxgate::{LatchScenario, TenantId};
//!
//! let scenario = LatchScenario::new(TenantId::generate());
//! let timeline = scenario.run(&mut service, &mut publisher, &mut subscriber)?;
//! ```
//!
//! # Architecture
//!
//! The storage service and the database endpoints are external
//! collaborators, reached only through the [`collab`] boundary traits and
//! the [`client::StorageHttpClient`]. The harness reads the effective latch
//! flag and writes only the desired-state toggle; it never owns the flag.

pub mod client;
pub mod collab;
pub mod error;
pub mod ids;
pub mod latch;
pub mod lsn;
pub mod replication;
pub mod scenario;

pub use auxgate_version as version;

pub use client::{StorageHttpClient, TenantConfig, TimelineDetail, TRY_ENABLE_AUX_FILE_V2};
pub use collab::{ComputeEndpoint, PgEndpoint, StorageService};
pub use error::{HarnessError, Result, ScenarioError};
pub use ids::{TenantId, TimelineId};
pub use latch::{LatchInvariant, LatchObserver, LatchState, LatchViolation};
pub use lsn::{InvalidLsn, Lsn};
pub use replication::logical_replication_sync;
pub use scenario::{LatchScenario, AUX_FILE_V2_ENABLED_MARKER};
