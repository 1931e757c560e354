use thiserror::Error;

/// Calendar decoding and expansion errors
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid recurrence rule: {0}")]
    RuleDecode(#[source] serde_json::Error),

    #[error("Invalid recurrence exceptions: {0}")]
    ExceptionDecode(#[source] serde_json::Error),

    #[error("Invalid recurrence end date '{value}': {source}")]
    EndDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: String, end: String },

    #[error(transparent)]
    CoreError(#[from] airboard_core::error::CoreError),
}

pub type CalendarResult<T> = std::result::Result<T, CalendarError>;
