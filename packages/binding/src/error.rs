use thiserror::Error;

/// Failures of the date formatting capability
///
/// These never reach the user: the value formatter recovers by showing the
/// raw value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateFormatError {
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),

    #[error("Unsupported date pattern token {token:?} in {pattern:?}")]
    UnsupportedPattern { pattern: String, token: String },

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

pub type DateFormatResult<T> = Result<T, DateFormatError>;
