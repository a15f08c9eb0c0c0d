//! Log sequence numbers
//!
//! A 64-bit WAL position, written in the server's `HI/LO` hexadecimal form
//! (e.g. `0/16B3748`). The replication-sync wait compares the subscriber's
//! progress against the publisher's flush position, so ordering follows the
//! numeric value.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A WAL position
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Lsn(pub u64);

/// Error returned when a string is not a valid `HI/LO` LSN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid LSN: {input:?}")]
pub struct InvalidLsn {
    /// The rejected input, verbatim
    pub input: String,
}

impl FromStr for Lsn {
    type Err = InvalidLsn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidLsn {
            input: s.to_string(),
        };
        let (hi, lo) = s.split_once('/').ok_or_else(invalid)?;
        let hi = u64::from_str_radix(hi, 16).map_err(|_| invalid())?;
        let lo = u64::from_str_radix(lo, 16).map_err(|_| invalid())?;
        // Both halves are 32-bit on the wire.
        if hi > u32::MAX as u64 || lo > u32::MAX as u64 {
            return Err(invalid());
        }
        Ok(Lsn(hi << 32 | lo))
    }
}

impl fmt::Display for Lsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}/{:X}", self.0 >> 32, self.0 & 0xffff_ffff)
    }
}
