//! Error types for the Untappd client.
//!
//! # Design
//! Upstream error payloads (a JSON body whose `meta.code` is not 200) are not
//! errors here: they parse as JSON and are handed back to the caller as-is.
//! Only failures the client itself can observe land in `ApiError`, and the
//! precondition variants (`MissingToken`, `TooLong`, `InvalidRating`) are
//! always raised before a request leaves the process.

use thiserror::Error;

/// Errors returned by `UntappdClient` and its endpoint groups.
#[derive(Debug, Error)]
pub enum ApiError {
    /// DNS, connect, TLS, timeout or body-read failure in the transport.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status and a body that is not JSON.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// A 2xx response body could not be parsed as JSON.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// Request options could not be flattened into query parameters.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A user-scoped endpoint was called before `set_token`.
    #[error("endpoint requires an access token; call set_token first")]
    MissingToken,

    /// Free text exceeds the length Untappd accepts.
    #[error("{field} is {length} characters, Untappd accepts at most {limit}")]
    TooLong {
        field: &'static str,
        length: usize,
        limit: usize,
    },

    /// Check-in rating outside `0..=5`.
    #[error("rating {0} is outside the accepted range 0 to 5")]
    InvalidRating(f64),

    /// Name-to-id resolution found no candidate.
    #[error("no {entity} found matching {name:?}")]
    NotFound { entity: &'static str, name: String },

    /// Missing or malformed client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}
