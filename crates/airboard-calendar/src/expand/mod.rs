//! Materialization of recurring events.
//!
//! A recurring event is walked forward from its start one rule step at a
//! time; every step that lands inside the query window becomes a
//! [`RecurringEventInstance`](crate::model::RecurringEventInstance).

mod expander;
mod options;
mod step;
mod window;
mod zone;

pub use expander::{RecurrenceExpander, expand_recurring_events};
pub use options::ExpansionOptions;
pub use step::next_occurrence;
pub use window::QueryWindow;

#[cfg(test)]
mod tests;
