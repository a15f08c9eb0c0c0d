//! Tenant and timeline identifiers
//!
//! The storage service addresses its units of isolation by tenant and
//! timeline. Both identifiers travel over the control-plane API as
//! 32-hex-character strings; internally they are UUIDs so test runs can
//! mint isolated pairs cheaply.

use std::fmt;
use uuid::Uuid;

/// Identifier of an isolated logical database on the storage service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantId(Uuid);

impl TenantId {
    /// Mint a fresh random tenant id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the service's hex form
    ///
    /// Returns None if the string is not a valid identifier.
    pub fn from_hex(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Identifier of a change history within a tenant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(Uuid);

impl TimelineId {
    /// Mint a fresh random timeline id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from the service's hex form
    pub fn from_hex(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}
