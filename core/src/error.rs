//! Error types for campustrack.
//!
//! Generation and aggregation never fail; everything here comes from
//! configuration, command-line lookups or serialization.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A configured value is out of range or malformed.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Failed to read or extract the layered configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    #[error("unknown {kind}: '{key}'")]
    UnknownKey { kind: &'static str, key: String },

    #[error("ambiguous {kind} '{key}' matches {candidates:?}")]
    AmbiguousKey {
        kind: &'static str,
        key: String,
        candidates: Vec<String>,
    },

    #[error("faculty member '{0}' not found")]
    UnknownFaculty(String),

    #[error("HOD '{0}' not found")]
    UnknownHod(String),

    #[error("could not parse date: '{input}'")]
    InvalidDate { input: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
