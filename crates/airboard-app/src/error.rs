use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CalendarError(#[from] airboard_calendar::CalendarError),

    #[error(transparent)]
    CoreError(#[from] airboard_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
