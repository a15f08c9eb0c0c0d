//! Logical replication synchronization
//!
//! Blocking wait until a subscriber's replication stream has caught up to
//! the publisher's current flush position. This is the scenario's only
//! genuine suspension point and it is bounded: a timeout is a scenario
//! failure, never an indefinite hang.

use crate::collab::ComputeEndpoint;
use crate::error::{HarnessError, Result, ScenarioError};
use crate::lsn::Lsn;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info};

const FLUSH_LSN_QUERY: &str = "SELECT pg_current_wal_flush_lsn()";
const SUBSCRIPTION_LSN_QUERY: &str = "select latest_end_lsn from pg_stat_subscription";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Wait until `subscriber` has received everything `publisher` has flushed
///
/// The publisher's flush position is sampled once up front; the subscriber
/// is then polled until its latest received position reaches it. Returns the
/// subscriber position that satisfied the wait.
pub fn logical_replication_sync<P, S>(
    publisher: &mut P,
    subscriber: &mut S,
    timeout: Duration,
) -> Result<Lsn>
where
    P: ComputeEndpoint + ?Sized,
    S: ComputeEndpoint + ?Sized,
{
    let raw = publisher
        .query_scalar(FLUSH_LSN_QUERY)?
        .ok_or_else(|| HarnessError::NoResult {
            query: FLUSH_LSN_QUERY.to_string(),
        })?;
    let target: Lsn = raw.parse()?;
    debug!(target_lsn = %target, "waiting for subscriber to catch up");

    let started = Instant::now();
    loop {
        // The subscription row can be absent or NULL right after creation.
        if let Some(raw) = subscriber.query_scalar(SUBSCRIPTION_LSN_QUERY)? {
            if !raw.is_empty() {
                let current: Lsn = raw.parse()?;
                if current >= target {
                    info!(target_lsn = %target, caught_up = %current, "replication caught up");
                    return Ok(current);
                }
                debug!(target_lsn = %target, received = %current, "still behind");
            }
        }
        if started.elapsed() >= timeout {
            return Err(ScenarioError::SyncTimeout {
                elapsed: started.elapsed(),
                target,
            }
            .into());
        }
        thread::sleep(POLL_INTERVAL);
    }
}
