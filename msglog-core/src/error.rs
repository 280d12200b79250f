use thiserror::Error;

/// Rejections produced while validating request parameters.
///
/// The display strings are the `detail` messages returned to API callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Start date is required")]
    MissingStartDate,

    #[error("End date is required")]
    MissingEndDate,

    #[error("Invalid start date: {0}")]
    InvalidStartDate(String),

    #[error("Invalid end date: {0}")]
    InvalidEndDate(String),

    #[error("Start date is greater than end date")]
    StartAfterEnd,

    #[error("Count is required")]
    MissingCount,

    #[error("Count must be an integer")]
    InvalidCount,

    #[error("Count must be between 1 and {max}")]
    CountOutOfRange { max: u32 },
}
