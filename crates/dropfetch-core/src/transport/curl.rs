//! libcurl-backed transport (single GET, no Range). Only http and https links
//! are fetched, including after redirects.

use super::{Transport, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Connection limits applied to every GET.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpOptions {
    pub connect_timeout: Duration,
    /// Upper bound on the whole transfer.
    pub timeout: Duration,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(30),
            timeout: Duration::from_secs(3600),
        }
    }
}

/// Downloads with a fresh curl easy handle per request. Follows redirects,
/// since direct links commonly bounce through a CDN.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    opts: HttpOptions,
}

impl CurlTransport {
    pub fn new(opts: HttpOptions) -> Self {
        Self { opts }
    }
}

impl Transport for CurlTransport {
    fn get(&self, url: &str, max_bytes: Option<u64>) -> Result<Vec<u8>, TransportError> {
        let mut body: Vec<u8> = Vec::new();
        let overflow = AtomicBool::new(false);

        check_scheme(url)?;

        let mut easy = curl::easy::Easy::new();
        easy.url(url).map_err(|e| TransportError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.opts.connect_timeout)?;
        easy.timeout(self.opts.timeout)?;
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;

        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if let Some(limit) = max_bytes {
                    if body.len() as u64 + data.len() as u64 > limit {
                        overflow.store(true, Ordering::Relaxed);
                        return Ok(0); // abort transfer
                    }
                }
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if let (true, Some(limit)) = (overflow.load(Ordering::Relaxed), max_bytes) {
                return Err(TransportError::TooLarge { limit });
            }
            return Err(TransportError::Curl(e));
        }

        if let Some(effective) = easy.effective_url()? {
            check_scheme(effective)?;
        }
        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(TransportError::Http(code));
        }
        tracing::debug!(url, bytes = body.len(), "GET complete");
        Ok(body)
    }
}

/// Direct links are remote: anything but http(s) (file://, ftp://...) is refused.
fn check_scheme(url: &str) -> Result<(), TransportError> {
    let invalid = |reason: String| TransportError::InvalidUrl {
        url: url.to_string(),
        reason,
    };
    let parsed = url::Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme {}", other))),
    }
}
