use airboard_calendar::Event;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// ## Summary
/// Body of the expansion endpoints: the events to expand and the window.
#[derive(Debug, Deserialize, Serialize)]
pub struct ExpandRequest {
    pub events: Vec<Event>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
