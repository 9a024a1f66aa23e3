//! Error types for a single fetch.
//!
//! # Design
//! Each variant marks the stage at which the call gave up: the session could
//! not be opened, the exchange never completed, or the bytes that came back
//! were not JSON. Every variant carries the underlying diagnostic so callers
//! can log it themselves. None of them is fatal to the process.

use thiserror::Error;

/// Errors returned by `Fetch::send` and friends.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The transport session could not be created. No request was attempted.
    #[error("cannot initialize the request: {0}")]
    SessionInitFailure(String),

    /// The session was open but the exchange did not complete (DNS, refused
    /// connection, broken transfer, timeout, malformed URL).
    #[error("cannot perform the request: {0}")]
    TransportFailure(String),

    /// The input could not be parsed: either the response body was not valid
    /// JSON, or a method name was not one of the four known ones.
    #[error("parse failure: {0}")]
    ParseFailure(String),
}
