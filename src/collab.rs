//! Collaborator boundaries
//!
//! The scenario never owns the storage service or the database processes;
//! it drives them through these traits. Process lifecycle stays opaque: the
//! harness only needs ready/stopped signals, a way to reach the control
//! plane, and a view of the service log.

use crate::error::{HarnessError, Result};
use crate::ids::{TenantId, TimelineId};
use postgres::{NoTls, SimpleQueryMessage};
use tracing::debug;

/// Process-control and observation surface of the storage service
pub trait StorageService {
    /// Control-plane base URL
    ///
    /// Re-read after every restart; the address may change.
    fn base_url(&self) -> String;

    /// Create a fresh timeline under `tenant`
    fn create_timeline(&mut self, tenant: TenantId) -> Result<TimelineId>;

    /// Restart the service process, blocking until it is ready again
    fn restart(&mut self) -> Result<()>;

    /// Whether the service log contains the literal `marker`
    fn log_contains(&self, marker: &str) -> Result<bool>;
}

/// A database endpoint the scenario issues SQL against
pub trait ComputeEndpoint {
    /// Connection string other endpoints can use to subscribe to this one
    fn connstr(&self) -> String;

    /// Run one or more statements, discarding any result rows
    fn execute(&mut self, sql: &str) -> Result<()>;

    /// First column of the first row, as text
    ///
    /// `None` when the query returns no rows or a NULL value.
    fn query_scalar(&mut self, sql: &str) -> Result<Option<String>>;

    /// Stop the endpoint; issuing further statements is a caller bug
    fn stop(&mut self) -> Result<()>;
}

/// `ComputeEndpoint` over a live Postgres connection
pub struct PgEndpoint {
    connstr: String,
    client: Option<postgres::Client>,
}

impl PgEndpoint {
    /// Connect to the database at `connstr`
    pub fn connect(connstr: &str) -> Result<Self> {
        debug!(connstr = %connstr, "connecting compute endpoint");
        let client = postgres::Client::connect(connstr, NoTls)?;
        Ok(PgEndpoint {
            connstr: connstr.to_string(),
            client: Some(client),
        })
    }

    fn client(&mut self) -> Result<&mut postgres::Client> {
        self.client.as_mut().ok_or(HarnessError::EndpointStopped)
    }
}

impl ComputeEndpoint for PgEndpoint {
    fn connstr(&self) -> String {
        self.connstr.clone()
    }

    fn execute(&mut self, sql: &str) -> Result<()> {
        self.client()?.batch_execute(sql)?;
        Ok(())
    }

    fn query_scalar(&mut self, sql: &str) -> Result<Option<String>> {
        let messages = self.client()?.simple_query(sql)?;
        for message in messages {
            if let SimpleQueryMessage::Row(row) = message {
                return Ok(row.get(0).map(str::to_string));
            }
        }
        Ok(None)
    }

    fn stop(&mut self) -> Result<()> {
        if let Some(client) = self.client.take() {
            client.close()?;
        }
        Ok(())
    }
}
