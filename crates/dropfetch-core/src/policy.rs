//! Download policy: size limit and restricted extensions.
//!
//! The checks are pure; they only build the rejection text. Showing it to the
//! user is up to the caller (the fetcher routes it to its `Alerter`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Bytes per "MB" as used by the size limit (decimal megabytes).
pub const BYTES_PER_MB: u64 = 1_000_000;

/// Default size limit in MB.
pub const DEFAULT_MAX_SIZE_MB: u64 = 10;

/// Restrictions applied to a selection before anything is downloaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadPolicy {
    /// Files of `max_size_mb * 1_000_000` bytes or more are rejected.
    pub max_size_mb: u64,
    /// Extensions (without the leading `.`) that are rejected. Case-sensitive.
    pub restricted_extensions: BTreeSet<String>,
}

impl Default for DownloadPolicy {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            restricted_extensions: BTreeSet::new(),
        }
    }
}

impl DownloadPolicy {
    /// Builds a policy, normalizing entries like `".txt"` to `"txt"`.
    pub fn new<I, S>(max_size_mb: u64, restricted: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let restricted_extensions = restricted
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()).to_string())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            max_size_mb,
            restricted_extensions,
        }
    }

    /// Size limit in bytes (saturating).
    pub fn max_size_bytes(&self) -> u64 {
        self.max_size_mb.saturating_mul(BYTES_PER_MB)
    }
}

fn normalize_extension(ext: &str) -> &str {
    ext.strip_prefix('.').unwrap_or(ext)
}

/// Why a selection was turned down, phrased for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub title: &'static str,
    pub message: String,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Fails when `size_bytes >= max_size_mb * 1_000_000`.
pub fn validate_size(size_bytes: u64, max_size_mb: u64) -> Result<(), Rejection> {
    if size_bytes >= max_size_mb.saturating_mul(BYTES_PER_MB) {
        return Err(Rejection {
            title: "Size Error",
            message: format!("Downloadable file should not more than {} MB size", max_size_mb),
        });
    }
    Ok(())
}

/// Fails when `extension` is in `restricted` (exact match).
pub fn validate_type(extension: &str, restricted: &BTreeSet<String>) -> Result<(), Rejection> {
    if restricted.contains(extension) {
        return Err(Rejection {
            title: "Type Error",
            message: format!("{} is restricted", extension),
        });
    }
    Ok(())
}
