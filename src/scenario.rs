//! End-to-end acceptance scenario for the aux-file latch
//!
//! Drives the external collaborators through the full latch lifecycle and
//! asserts each contract point in order:
//!
//! 1. Create a timeline; endpoints are provisioned by the caller.
//! 2. Enable the tenant toggle (read-modify-write of the effective config).
//! 3. Assert the effective flag is still `false` (precondition).
//! 4. Build a logical-replication workload and wait, bounded, for the
//!    subscriber to catch up.
//! 5. Stop both endpoints.
//! 6. Assert the service logged the enabling marker.
//! 7. Assert the effective flag flipped to `true` (transition).
//! 8. Disable the tenant toggle.
//! 9. Assert the effective flag is still `true` (monotonicity).
//! 10. Restart the service, blocking until ready.
//! 11. Assert the effective flag is still `true` (durability).
//!
//! Every assertion failure is fatal and names the invariant it broke; there
//! are no retries at this layer.

use crate::client::{StorageHttpClient, TRY_ENABLE_AUX_FILE_V2};
use crate::collab::{ComputeEndpoint, StorageService};
use crate::error::{Result, ScenarioError};
use crate::ids::{TenantId, TimelineId};
use crate::latch::{LatchInvariant, LatchObserver, LatchState};
use crate::replication::logical_replication_sync;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Literal line the service logs when the write path enables the latch
pub const AUX_FILE_V2_ENABLED_MARKER: &str = "enabling aux file v2 support";

const DEFAULT_SYNC_TIMEOUT: Duration = Duration::from_secs(30);

/// The latch acceptance scenario, bound to one tenant
///
/// Concurrent runs must use isolated tenant/timeline pairs; latch state is
/// per timeline and a shared tenant would cross-contaminate the toggles.
pub struct LatchScenario {
    tenant: TenantId,
    sync_timeout: Duration,
}

impl LatchScenario {
    /// Scenario for `tenant` with the default replication-sync timeout
    pub fn new(tenant: TenantId) -> Self {
        LatchScenario {
            tenant,
            sync_timeout: DEFAULT_SYNC_TIMEOUT,
        }
    }

    /// Override the bounded replication-sync wait
    pub fn with_sync_timeout(mut self, timeout: Duration) -> Self {
        self.sync_timeout = timeout;
        self
    }

    /// The tenant this scenario runs against
    pub fn tenant(&self) -> TenantId {
        self.tenant
    }

    /// Run the scenario to completion, returning the timeline it created
    pub fn run<S, P, Q>(
        &self,
        service: &mut S,
        publisher: &mut P,
        subscriber: &mut Q,
    ) -> Result<TimelineId>
    where
        S: StorageService,
        P: ComputeEndpoint,
        Q: ComputeEndpoint,
    {
        let mut latch = LatchObserver::new();

        // Step 1: fresh timeline for an isolated latch.
        let timeline = service.create_timeline(self.tenant)?;
        info!(tenant = %self.tenant, timeline = %timeline, "timeline created");

        // Step 2: desired state on.
        let client = StorageHttpClient::new(service.base_url())?;
        self.set_toggle(&client, true)?;
        info!(step = 2, "tenant toggle enabled");

        // Step 3: the toggle alone must not flip the latch.
        let detail = client.timeline_detail(self.tenant, timeline)?;
        latch
            .expect(
                detail.aux_file_v2,
                LatchState::Unset,
                LatchInvariant::Precondition,
            )
            .map_err(ScenarioError::from)?;
        info!(step = 3, "latch still unset before the first write");

        // Step 4: replication workload. Aux files are written when the
        // subscription is established, which is what drives the write path.
        publisher.execute("create table t(pk integer primary key, payload integer)")?;
        publisher.execute(
            "create table replication_example(id serial primary key, somedata int, text varchar(120))",
        )?;
        publisher.execute("create publication pub1 for table t, replication_example")?;

        subscriber.execute("create table t(pk integer primary key, payload integer)")?;
        subscriber.execute(
            "create table replication_example(id serial primary key, somedata int, text varchar(120), \
             testcolumn1 int, testcolumn2 int, testcolumn3 int)",
        )?;
        let connstr = publisher.connstr().replace('\'', "''");
        subscriber.execute(&format!(
            "create subscription sub1 connection '{connstr}' publication pub1"
        ))?;

        let caught_up = logical_replication_sync(publisher, subscriber, self.sync_timeout)?;
        info!(step = 4, lsn = %caught_up, "subscriber caught up");

        // Step 5.
        subscriber.stop()?;
        publisher.stop()?;
        info!(step = 5, "endpoints stopped");

        // Step 6: the transition must be witnessed in the log.
        if !service.log_contains(AUX_FILE_V2_ENABLED_MARKER)? {
            return Err(ScenarioError::MarkerMissing {
                marker: AUX_FILE_V2_ENABLED_MARKER.to_string(),
            }
            .into());
        }

        // Step 7.
        let detail = client.timeline_detail(self.tenant, timeline)?;
        latch
            .expect(
                detail.aux_file_v2,
                LatchState::Enabled,
                LatchInvariant::Transition,
            )
            .map_err(ScenarioError::from)?;
        info!(step = 7, "latch enabled after the gated write");

        // Steps 8-9: turning the toggle back off must not unlatch.
        self.set_toggle(&client, false)?;
        let detail = client.timeline_detail(self.tenant, timeline)?;
        latch
            .expect(
                detail.aux_file_v2,
                LatchState::Enabled,
                LatchInvariant::Monotonicity,
            )
            .map_err(ScenarioError::from)?;
        info!(step = 9, "latch survived the toggle going off");

        // Step 10: full process restart, blocking until ready.
        service.restart()?;
        info!(step = 10, "service restarted");

        // Step 11: the latch is durable, not a memory-only cache. The
        // service address may have changed, so build a fresh client.
        let client = StorageHttpClient::new(service.base_url())?;
        let detail = client.timeline_detail(self.tenant, timeline)?;
        latch
            .expect(
                detail.aux_file_v2,
                LatchState::Enabled,
                LatchInvariant::Durability,
            )
            .map_err(ScenarioError::from)?;
        info!(step = 11, "latch survived the restart");

        Ok(timeline)
    }

    fn set_toggle(&self, client: &StorageHttpClient, enabled: bool) -> Result<()> {
        let mut config = client.tenant_config(self.tenant)?.effective_config;
        config.insert(TRY_ENABLE_AUX_FILE_V2.to_string(), Value::Bool(enabled));
        client.set_tenant_config(self.tenant, &config)
    }
}
