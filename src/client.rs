//! Storage-service control-plane client
//!
//! Thin blocking HTTP client over the three endpoints the harness needs:
//! tenant config read, tenant config write, and timeline detail. The
//! harness only ever writes the *desired* configuration; the effective
//! latch flag is read-only from this side.

use crate::error::{HarnessError, Result};
use crate::ids::{TenantId, TimelineId};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;
use tracing::debug;

/// Tenant-level config key holding the desired-state toggle
pub const TRY_ENABLE_AUX_FILE_V2: &str = "try_enable_aux_file_v2";

/// Tenant configuration as reported by the service
#[derive(Debug, Clone, Deserialize)]
pub struct TenantConfig {
    /// The merged, currently effective config map
    pub effective_config: Map<String, Value>,
}

/// Timeline detail as reported by the service
///
/// Only the latch flag is interpreted; everything else the service reports
/// is carried along untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct TimelineDetail {
    /// Effective state of the aux-file latch
    pub aux_file_v2: bool,
    /// Remaining detail fields, passed through
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Blocking client for the storage service's HTTP API
pub struct StorageHttpClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl StorageHttpClient {
    /// Build a client for the service at `base_url`
    ///
    /// The service address can change across restarts, so callers construct
    /// a fresh client from the collaborator's current `base_url()` after any
    /// restart.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(StorageHttpClient { http, base_url })
    }

    /// `GET /v1/tenant/{tenant}/config`
    pub fn tenant_config(&self, tenant: TenantId) -> Result<TenantConfig> {
        let url = format!("{}/v1/tenant/{}/config", self.base_url, tenant);
        debug!(tenant = %tenant, "fetching tenant config");
        self.get_json(url)
    }

    /// `PUT /v1/tenant/config`
    ///
    /// Sends the full config map; the service replaces the tenant's desired
    /// configuration with it, so callers read-modify-write to preserve
    /// unrelated keys.
    pub fn set_tenant_config(&self, tenant: TenantId, config: &Map<String, Value>) -> Result<()> {
        let url = format!("{}/v1/tenant/config", self.base_url);
        debug!(tenant = %tenant, "updating tenant config");
        let body = json!({
            "tenant_id": tenant.to_string(),
            "config": config,
        });
        let resp = self.http.put(&url).json(&body).send()?;
        Self::check_status(resp, &url)?;
        Ok(())
    }

    /// `GET /v1/tenant/{tenant}/timeline/{timeline}`
    pub fn timeline_detail(&self, tenant: TenantId, timeline: TimelineId) -> Result<TimelineDetail> {
        let url = format!(
            "{}/v1/tenant/{}/timeline/{}",
            self.base_url, tenant, timeline
        );
        debug!(tenant = %tenant, timeline = %timeline, "fetching timeline detail");
        self.get_json(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        let resp = self.http.get(&url).send()?;
        let resp = Self::check_status(resp, &url)?;
        Ok(resp.json()?)
    }

    fn check_status(
        resp: reqwest::blocking::Response,
        url: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if !status.is_success() {
            return Err(HarnessError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body: resp.text().unwrap_or_default(),
            });
        }
        Ok(resp)
    }
}
