use chrono::{DateTime, NaiveTime, Utc};

use crate::error::{CalendarError, CalendarResult};

/// ## Summary
/// Caller-supplied window an expansion is materialized for.
///
/// The start is compared as an exact instant. The end is inclusive of its
/// whole UTC calendar day: the window runs up to, but excluding, midnight
/// after `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryWindow {
    start: DateTime<Utc>,
    limit: DateTime<Utc>,
}

impl QueryWindow {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let limit = end
            .date_naive()
            .succ_opt()
            .map_or(DateTime::<Utc>::MAX_UTC, |day| {
                day.and_time(NaiveTime::MIN).and_utc()
            });
        Self { start, limit }
    }

    /// ## Summary
    /// Like [`QueryWindow::new`], but rejects a start after the end.
    ///
    /// ## Errors
    /// Returns `CalendarError::InvalidWindow` if `start > end`.
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> CalendarResult<Self> {
        if start > end {
            return Err(CalendarError::InvalidWindow {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self::new(start, end))
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive upper bound: midnight after the end date.
    #[must_use]
    pub fn limit(&self) -> DateTime<Utc> {
        self.limit
    }

    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.limit
    }

    /// Whether `[start, end]` touches the window.
    #[must_use]
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.limit && end >= self.start
    }
}
