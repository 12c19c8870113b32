//! Error types for tgviz

use thiserror::Error;

/// Main error type for the tgviz library
///
/// The three reporting kinds are distinct so callers can match on what
/// actually went wrong: the request never reached the API
/// ([`Error::Transport`]), the API rejected it ([`Error::Status`]), or
/// the API answered with a body that does not fit the expected shape
/// ([`Error::Validation`]).
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or timed out (connection, DNS, timeout)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// API reachable but replied with a 4xx/5xx status
    #[error("API error ({status}): {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, best-effort
        body: String,
    },

    /// API replied successfully but the body failed validation
    #[error("invalid API response: {0}")]
    Validation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for tgviz
pub type Result<T> = std::result::Result<T, Error>;
