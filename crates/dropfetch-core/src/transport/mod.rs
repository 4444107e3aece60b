//! Transport boundary: fetch the full body of a URL.
//!
//! Implementations are blocking; the fetcher runs them on a blocking worker.

mod curl;

pub use self::curl::{CurlTransport, HttpOptions};

use thiserror::Error;

/// Why a GET did not produce a body.
#[derive(Debug, Error)]
pub enum TransportError {
    /// libcurl reported an error (DNS, connect, timeout, TLS...).
    #[error("transfer failed: {0}")]
    Curl(#[from] ::curl::Error),
    /// The response status was not 2xx.
    #[error("HTTP {0}")]
    Http(u32),
    /// The body grew past the caller's byte cap.
    #[error("body exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    /// The URL could not be used (e.g. unsupported scheme).
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Blocking GET of a whole resource.
pub trait Transport: Send + Sync {
    /// Returns the body of `url`. When `max_bytes` is set, a body longer than
    /// that fails with [`TransportError::TooLarge`].
    fn get(&self, url: &str, max_bytes: Option<u64>) -> Result<Vec<u8>, TransportError>;
}
