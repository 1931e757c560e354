//! The recurrence walk.

use std::collections::HashSet;

use chrono::{DateTime, NaiveTime, Utc};

use super::options::ExpansionOptions;
use super::step::next_occurrence;
use super::window::QueryWindow;
use super::zone;
use crate::model::{Event, RecurrencePattern, RecurringEventInstance};

/// Date format exceptions are matched in.
const EXCEPTION_DATE_FORMAT: &str = "%Y-%m-%d";

/// ## Summary
/// Materializes recurring events into concrete instances.
///
/// The expander holds no state besides its options; one instance can serve
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct RecurrenceExpander {
    options: ExpansionOptions,
}

impl RecurrenceExpander {
    #[must_use]
    pub fn new(options: ExpansionOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &ExpansionOptions {
        &self.options
    }

    /// ## Summary
    /// Expands every recurring event in `events` over `[window_start, window_end]`.
    ///
    /// Instances are grouped by event in input order and are chronological
    /// within an event. Non-recurring events contribute nothing. An event
    /// whose rule does not decode is skipped; an exception list that does not
    /// decode is treated as empty. Neither is reported to the caller.
    ///
    /// ## Side Effects
    /// None besides debug logging; inputs are not modified.
    #[must_use]
    pub fn expand(
        &self,
        events: &[Event],
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Vec<RecurringEventInstance> {
        let window = QueryWindow::new(window_start, window_end);
        let safety_limit = self.options.safety_limit();

        events
            .iter()
            .filter(|event| event.is_recurring)
            .flat_map(|event| self.expand_event(event, &window, safety_limit))
            .collect()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(event_id = event.id))]
    fn expand_event(
        &self,
        event: &Event,
        window: &QueryWindow,
        safety_limit: DateTime<Utc>,
    ) -> Vec<RecurringEventInstance> {
        let pattern = match event.pattern() {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::debug!(event_id = event.id, error = %e, "Skipping recurring event");
                return Vec::new();
            }
        };

        if pattern.interval < 1 {
            tracing::debug!(
                event_id = event.id,
                interval = pattern.interval,
                "Non-positive interval stepped as 1"
            );
        }

        let exceptions = event.exceptions().unwrap_or_else(|e| {
            tracing::debug!(event_id = event.id, error = %e, "Ignoring recurrence exceptions");
            HashSet::new()
        });

        let walk = Walk {
            event,
            pattern: &pattern,
            exceptions: &exceptions,
            window,
            recurrence_end: recurrence_end(event, &pattern, window),
            max_occurrences: pattern.occurrence_limit(self.options.max_occurrences),
            safety_limit,
        };

        walk.run(zone::resolve(
            event.timezone.as_deref(),
            self.options.default_timezone,
        ))
    }
}

/// ## Summary
/// Instant at which generation stops for `event`.
///
/// The event's own `recurrence_end` wins; otherwise an `on_date` rule ends at
/// midnight UTC of its end date. Either way generation never runs past the
/// window.
fn recurrence_end(event: &Event, pattern: &RecurrencePattern, window: &QueryWindow) -> DateTime<Utc> {
    let explicit = event.recurrence_end.or_else(|| match pattern.end_date() {
        Ok(date) => date.map(|date| date.and_time(NaiveTime::MIN).and_utc()),
        Err(e) => {
            tracing::debug!(event_id = event.id, error = %e, "Ignoring recurrence end date");
            None
        }
    });

    explicit.map_or(window.limit(), |end| end.min(window.limit()))
}

/// A single event's bounded walk.
struct Walk<'a> {
    event: &'a Event,
    pattern: &'a RecurrencePattern,
    exceptions: &'a HashSet<String>,
    window: &'a QueryWindow,
    recurrence_end: DateTime<Utc>,
    max_occurrences: u32,
    safety_limit: DateTime<Utc>,
}

impl Walk<'_> {
    /// Steps from the event start until the end boundary, the occurrence cap
    /// or the safety horizon is reached, whichever comes first.
    fn run(&self, tz: chrono_tz::Tz) -> Vec<RecurringEventInstance> {
        let duration = self.event.duration();
        let mut instances = Vec::new();
        let mut current = self.event.start_date;
        let mut local = zone::to_local(current, tz);
        let mut generated: u32 = 0;

        while current < self.recurrence_end && generated < self.max_occurrences {
            if self.window.contains(current) {
                let date_key = local.format(EXCEPTION_DATE_FORMAT).to_string();
                instances.push(RecurringEventInstance::new(
                    self.event,
                    current,
                    duration,
                    self.exceptions.contains(&date_key),
                ));
            }

            generated += 1;

            let Some(next_local) = next_occurrence(local, self.pattern) else {
                break;
            };
            let Some(next) = zone::to_utc(next_local, tz) else {
                break;
            };
            if next > self.safety_limit {
                tracing::debug!(event_id = self.event.id, "Recurrence walk hit the safety horizon");
                break;
            }

            local = next_local;
            current = next;
        }

        instances
    }
}

/// ## Summary
/// Expands `events` over `[window_start, window_end]` with default options.
///
/// See [`RecurrenceExpander::expand`].
#[must_use]
pub fn expand_recurring_events(
    events: &[Event],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<RecurringEventInstance> {
    RecurrenceExpander::default().expand(events, window_start, window_end)
}
