use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths::{RootKind, Roots, TargetDir};
use crate::policy::{DownloadPolicy, DEFAULT_MAX_SIZE_MB};
use crate::transport::HttpOptions;

/// HTTP limits (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Seconds to wait for the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Upper bound in seconds for a whole download.
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 30,
            timeout_secs: 3600,
        }
    }
}

impl HttpConfig {
    pub fn options(&self) -> HttpOptions {
        HttpOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Where files go when the caller doesn't say.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub root: RootKind,
    #[serde(default)]
    pub sub_path: String,
}

/// Global configuration loaded from `~/.config/dropfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Files this many MB (decimal) or larger are refused.
    pub max_size_mb: u64,
    /// Extensions that are refused, e.g. `["txt", "exe"]`.
    #[serde(default)]
    pub restricted_extensions: Vec<String>,
    /// Overrides the platform library root (XDG data home).
    #[serde(default)]
    pub library_root: Option<PathBuf>,
    /// Overrides the platform documents directory.
    #[serde(default)]
    pub document_root: Option<PathBuf>,
    #[serde(default)]
    pub default_target: TargetConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            restricted_extensions: Vec::new(),
            library_root: None,
            document_root: None,
            default_target: TargetConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl FetcherConfig {
    /// Default policy for fetches started without explicit limits.
    pub fn policy(&self) -> DownloadPolicy {
        DownloadPolicy::new(self.max_size_mb, &self.restricted_extensions)
    }

    pub fn default_target(&self) -> TargetDir {
        TargetDir::new(self.default_target.root, self.default_target.sub_path.clone())
    }

    /// Platform roots with any configured overrides applied. Platform lookup
    /// is skipped when both roots are overridden.
    pub fn roots(&self) -> Result<Roots> {
        if let (Some(library), Some(document)) = (&self.library_root, &self.document_root) {
            return Ok(Roots {
                library: library.clone(),
                document: document.clone(),
            });
        }
        let mut roots = Roots::platform()?;
        if let Some(library) = &self.library_root {
            roots.library = library.clone();
        }
        if let Some(document) = &self.document_root {
            roots.document = document.clone();
        }
        Ok(roots)
    }
}

/// Render `cfg` the way it is stored on disk.
pub fn to_toml(cfg: &FetcherConfig) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dropfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetcherConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetcherConfig::default();
        let toml = to_toml(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: FetcherConfig = toml::from_str(&data)?;
    Ok(cfg)
}
