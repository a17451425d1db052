use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Configuration error: {0}")]
    #[diagnostic(code(agendashare::config))]
    Config(String),

    #[error("Sign-in was cancelled or denied")]
    #[diagnostic(code(agendashare::auth_cancelled))]
    AuthCancelled,

    #[error("Not signed in")]
    #[diagnostic(code(agendashare::unauthenticated))]
    Unauthenticated,

    #[error("Calendar API error: {0}")]
    #[diagnostic(code(agendashare::calendar_api))]
    CalendarApi(String),

    #[error("Validation error: {0}")]
    #[diagnostic(code(agendashare::validation))]
    Validation(String),

    #[error("Message dispatch error: {0}")]
    #[diagnostic(code(agendashare::dispatch))]
    Dispatch(String),

    #[error(transparent)]
    #[diagnostic(code(agendashare::io))]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    #[diagnostic(code(agendashare::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

// Prompt failures from the screen loop
impl From<inquire::InquireError> for Error {
    fn from(err: inquire::InquireError) -> Self {
        Error::Other(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create calendar API errors
pub fn calendar_api_error(message: &str) -> Error {
    Error::CalendarApi(message.to_string())
}

/// Helper to create validation errors
pub fn validation_error(message: &str) -> Error {
    Error::Validation(message.to_string())
}

/// Helper to create dispatch errors
pub fn dispatch_error(message: &str) -> Error {
    Error::Dispatch(message.to_string())
}

/// Helper to create other errors
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}
