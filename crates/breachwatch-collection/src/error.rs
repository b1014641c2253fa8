//! Error types for loading and querying breach collections.

use breachwatch_core::BreachwatchError;
use thiserror::Error;

use crate::schema::ValidationError;

/// Errors that can occur while loading or querying a collection.
///
/// Only loading can fail on well-formed input; filters, sorts and
/// projections over in-memory rows never return an error.
#[derive(Error, Debug)]
pub enum CollectionError {
    /// The request could not be sent or the response could not be read
    #[error("request to {url} failed: {source}")]
    Transport {
        /// Endpoint that was requested
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-success status
    #[error("breach list request to {url} returned HTTP {status}")]
    HttpStatus {
        /// Endpoint that was requested
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not a JSON array of breach records
    #[error("malformed breach list: {message}")]
    Decode {
        /// What was wrong with the body
        message: String,
    },

    /// A record did not match the breach schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A sort direction that is not `asc`, `desc`, `1` or `-1`
    #[error("invalid sort direction '{value}': expected asc, desc, 1 or -1")]
    InvalidDirection {
        /// The direction as supplied
        value: String,
    },

    /// Unknown field names and other core errors
    #[error(transparent)]
    Core(#[from] BreachwatchError),

    /// I/O error reading a local breach list
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CollectionError {
    /// Whether the error came from fetching or decoding the list, as opposed
    /// to schema validation or caller input.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::HttpStatus { .. } | Self::Decode { .. } | Self::Io(_)
        )
    }
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
