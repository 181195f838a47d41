//! Error types for netsonde.

use thiserror::Error;

/// Result type alias for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur during a probe run.
///
/// Transport errors are deliberately not classified further (DNS vs TLS vs
/// timeout); that distinction belongs to the transport layer.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The probe URL could not be parsed.
    #[error("invalid probe URL: {0}")]
    InvalidUrl(String),

    /// The initial GET (and its single referer fallback) failed to connect.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The server answered the fallback request with a non-success status.
    #[error("server rejected probe request: HTTP {status}")]
    Rejected {
        /// HTTP status code of the final response.
        status: u16,
    },

    /// An I/O error occurred while reading the response stream.
    ///
    /// Measurements collected before the failure are discarded; no partial
    /// result is synthesized.
    #[error("stream read failed: {0}")]
    Stream(String),
}
