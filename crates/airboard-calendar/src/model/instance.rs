use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::Event;

/// ## Summary
/// One concrete occurrence of a recurring event inside a query window.
///
/// Instances are computed per request and never persisted. Cancelled
/// occurrences are still listed; the response layer decides how to show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringEventInstance {
    /// Owned copy of the originating event.
    pub event: Event,
    pub instance_date: DateTime<Utc>,
    /// `instance_date` shifted by the event's duration, if it has one.
    pub instance_end_date: Option<DateTime<Utc>>,
    /// The event's own `start_date`.
    pub original_date: DateTime<Utc>,
    pub is_cancelled: bool,
}

impl RecurringEventInstance {
    #[must_use]
    pub fn new(
        event: &Event,
        instance_date: DateTime<Utc>,
        duration: Option<TimeDelta>,
        is_cancelled: bool,
    ) -> Self {
        Self {
            event: event.clone(),
            instance_date,
            instance_end_date: duration.and_then(|d| instance_date.checked_add_signed(d)),
            original_date: event.start_date,
            is_cancelled,
        }
    }
}
