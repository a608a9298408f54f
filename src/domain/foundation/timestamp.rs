//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Returns the current moment, or `self` if the clock reads earlier.
    ///
    /// Used for `updated_at` bumps so that a wall-clock step backwards never
    /// makes a later mutation look older than an earlier one.
    pub fn advance(&self) -> Self {
        Self::now().max(*self)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
