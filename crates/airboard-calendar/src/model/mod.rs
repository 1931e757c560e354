//! Calendar data model: stored events, their decoded recurrence rule and the
//! ephemeral instances produced for a query window.

mod event;
mod instance;
mod pattern;

pub use event::{Event, decode_exceptions};
pub use instance::RecurringEventInstance;
pub use pattern::{EndType, RecurrencePattern, RecurrenceType};

use serde::{Deserialize, Deserializer};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
