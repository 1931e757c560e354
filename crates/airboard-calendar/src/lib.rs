//! Calendar domain for the Airboard portal.
//!
//! Events come from the event store with their recurrence rule and exception
//! list still serialized as JSON text. This crate decodes them and
//! materializes the concrete occurrences of recurring events inside a query
//! window, for the calendar views of the portal.

pub mod error;
pub mod expand;
pub mod model;
pub mod view;

pub use error::{CalendarError, CalendarResult};
pub use expand::{ExpansionOptions, RecurrenceExpander, expand_recurring_events};
pub use model::{EndType, Event, RecurrencePattern, RecurrenceType, RecurringEventInstance};
pub use view::CalendarView;
