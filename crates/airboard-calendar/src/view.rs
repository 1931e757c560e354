//! Calendar view assembly for the portal's month/week screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::expand::{QueryWindow, RecurrenceExpander};
use crate::model::{Event, RecurringEventInstance};

/// ## Summary
/// Everything a calendar screen shows for one window.
///
/// One-off events are listed as stored; recurring events appear only through
/// their expanded instances.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarView {
    pub events: Vec<Event>,
    pub recurring_instances: Vec<RecurringEventInstance>,
}

impl CalendarView {
    /// ## Summary
    /// Builds the view of `events` for `[window_start, window_end]`.
    ///
    /// A one-off event is kept when its span (start to end, or just start)
    /// overlaps the window, in input order.
    #[must_use]
    pub fn build(
        events: &[Event],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        expander: &RecurrenceExpander,
    ) -> Self {
        let window = QueryWindow::new(window_start, window_end);

        let one_off = events
            .iter()
            .filter(|event| !event.is_recurring)
            .filter(|event| {
                let end = event.end_date.unwrap_or(event.start_date).max(event.start_date);
                window.overlaps(event.start_date, end)
            })
            .cloned()
            .collect();

        Self {
            events: one_off,
            recurring_instances: expander.expand(events, window_start, window_end),
        }
    }

    /// Instances that have not been cancelled.
    pub fn active_instances(&self) -> impl Iterator<Item = &RecurringEventInstance> {
        self.recurring_instances
            .iter()
            .filter(|instance| !instance.is_cancelled)
    }
}
