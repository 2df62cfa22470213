use fa_auth::AuthError;
use fa_config::ConfigError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors surfaced by the `financeai` binary
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("{source}")]
    Auth {
        #[from]
        source: AuthError,
    },

    #[error("Input error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl CliError {
    #[track_caller]
    pub fn input(message: impl Into<String>) -> Self {
        CliError::Input {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        CliError::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// What to print on stderr.
    pub fn user_message(&self) -> String {
        match self {
            CliError::Auth { source } => source.user_message(),
            CliError::Input { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Stable machine-readable code, printed in brackets on the error line.
    pub fn error_code(&self) -> &'static str {
        match self {
            CliError::Config { .. } => "CONFIG",
            CliError::Auth { source } => source.error_code(),
            CliError::Input { .. } => "INPUT",
            CliError::Logger { .. } => "LOGGER",
            CliError::Json { .. } => "JSON",
        }
    }
}

impl From<serde_json::Error> for CliError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        CliError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
