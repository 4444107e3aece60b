//! The fetch pipeline: select, check policy, download, save.
//!
//! Stages run strictly in order and the first failure ends the fetch:
//!
//! 1. ask the chooser for one direct-link selection (on a blocking worker)
//! 2. size check, 3. extension check (both alert the user on rejection)
//! 4. resolve the local target directory
//! 5. download on a blocking worker; the bytes come back to the awaiting task
//! 6. create the target directory if needed
//! 7. atomic write of `<directory>/<name>`
//!
//! The returned future resolves exactly once with the saved record or a
//! [`FetchError`] carrying the record as far as it got.

mod locks;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

use crate::alert::Alerter;
use crate::chooser::{Chooser, ChooserRequest};
use crate::config::FetcherConfig;
use crate::error::{DownloadFailure, FetchError};
use crate::paths::{Roots, TargetDir};
use crate::policy::{self, DownloadPolicy};
use crate::remote_file::RemoteFile;
use crate::storage::{FileStore, LocalFs};
use crate::transport::{CurlTransport, Transport};

use locks::PathLocks;

/// Picks, validates, downloads and saves one remote file per [`fetch`](Self::fetch) call.
pub struct RemoteFileFetcher {
    chooser: Arc<dyn Chooser>,
    alerter: Arc<dyn Alerter>,
    transport: Arc<dyn Transport>,
    store: Arc<dyn FileStore>,
    roots: Roots,
    write_locks: PathLocks,
}

/// Builder for [`RemoteFileFetcher`]. Transport defaults to curl, storage to
/// the local filesystem and roots to the platform directories.
pub struct FetcherBuilder {
    chooser: Arc<dyn Chooser>,
    alerter: Arc<dyn Alerter>,
    transport: Option<Arc<dyn Transport>>,
    store: Option<Arc<dyn FileStore>>,
    roots: Option<Roots>,
}

impl FetcherBuilder {
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn store(mut self, store: Arc<dyn FileStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn roots(mut self, roots: Roots) -> Self {
        self.roots = Some(roots);
        self
    }

    /// Take roots and HTTP limits from `cfg` (explicit overrides still win).
    pub fn config(mut self, cfg: &FetcherConfig) -> Result<Self> {
        if self.roots.is_none() {
            self.roots = Some(cfg.roots()?);
        }
        if self.transport.is_none() {
            self.transport = Some(Arc::new(CurlTransport::new(cfg.http.options())));
        }
        Ok(self)
    }

    pub fn build(self) -> Result<RemoteFileFetcher> {
        let roots = match self.roots {
            Some(r) => r,
            None => Roots::platform()?,
        };
        Ok(RemoteFileFetcher {
            chooser: self.chooser,
            alerter: self.alerter,
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(CurlTransport::default())),
            store: self.store.unwrap_or_else(|| Arc::new(LocalFs)),
            roots,
            write_locks: PathLocks::new(),
        })
    }
}

impl RemoteFileFetcher {
    pub fn builder(chooser: Arc<dyn Chooser>, alerter: Arc<dyn Alerter>) -> FetcherBuilder {
        FetcherBuilder {
            chooser,
            alerter,
            transport: None,
            store: None,
            roots: None,
        }
    }

    pub fn roots(&self) -> &Roots {
        &self.roots
    }

    /// Runs the whole pipeline once for `target` under `policy`.
    pub async fn fetch(
        &self,
        target: &TargetDir,
        policy: &DownloadPolicy,
    ) -> Result<RemoteFile, FetchError> {
        let mut file = self.select().await?;
        self.check_policy(&file, policy)?;

        file.local_path = target.resolve(&self.roots);
        tracing::debug!(dir = %file.local_path.display(), "resolved target directory");

        let data = match self.download(&file, policy).await {
            Ok(d) => d,
            Err(source) => {
                tracing::error!(name = ?file.name, error = %source, "download failed");
                return Err(FetchError::DownloadFailed {
                    file: Box::new(file),
                    source,
                });
            }
        };
        file.file_data = Some(data);

        self.save(file).await
    }

    /// The chooser may block on user input, so it runs on a blocking worker.
    async fn select(&self) -> Result<RemoteFile, FetchError> {
        let chooser = Arc::clone(&self.chooser);
        let chosen =
            tokio::task::spawn_blocking(move || chooser.choose(&ChooserRequest::single_direct()))
                .await;
        let results = match chosen {
            Ok(Ok(r)) => r,
            Ok(Err(e)) => {
                tracing::warn!("chooser failed: {:#}", e);
                return Err(FetchError::SelectionCancelled);
            }
            Err(e) => {
                tracing::warn!("chooser worker failed: {}", e);
                return Err(FetchError::SelectionCancelled);
            }
        };
        let Some(first) = results.into_iter().next() else {
            tracing::info!("selection cancelled");
            return Err(FetchError::SelectionCancelled);
        };
        let file = RemoteFile::from_selection(first);
        tracing::debug!(?file, "selected");
        Ok(file)
    }

    fn check_policy(&self, file: &RemoteFile, policy: &DownloadPolicy) -> Result<(), FetchError> {
        // Unknown size passes here; the download is capped instead.
        if let Some(size) = file.size_bytes {
            if let Err(rejection) = policy::validate_size(size, policy.max_size_mb) {
                tracing::warn!(size, limit_mb = policy.max_size_mb, "{}", rejection.message);
                self.alerter.show_alert(rejection.title, &rejection.message);
                return Err(FetchError::SizeRejected {
                    file: Box::new(file.clone()),
                    message: rejection.message,
                });
            }
        }

        let restricted = &policy.restricted_extensions;
        if let Err(rejection) = policy::validate_type(file.extension(), restricted) {
            tracing::warn!(extension = file.extension(), "{}", rejection.message);
            self.alerter.show_alert(rejection.title, &rejection.message);
            return Err(FetchError::TypeRejected {
                file: Box::new(file.clone()),
                message: rejection.message,
            });
        }
        Ok(())
    }

    async fn download(
        &self,
        file: &RemoteFile,
        policy: &DownloadPolicy,
    ) -> Result<Vec<u8>, DownloadFailure> {
        let link = file
            .download_link
            .clone()
            .ok_or(DownloadFailure::MissingLink)?;
        // Largest body that still passes the size check.
        let cap = policy.max_size_bytes().saturating_sub(1);
        let transport = Arc::clone(&self.transport);

        tracing::debug!(url = %link, cap, "downloading");
        let data = tokio::task::spawn_blocking(move || transport.get(link.as_str(), Some(cap)))
            .await??;
        if data.is_empty() {
            return Err(DownloadFailure::Empty);
        }
        Ok(data)
    }

    async fn save(&self, mut file: RemoteFile) -> Result<RemoteFile, FetchError> {
        let dir = file.local_path.clone();
        let final_path = file.saved_path();
        let lock_key: PathBuf = final_path.clone().unwrap_or_else(|| dir.clone());
        let _guard = self.write_locks.lock(&lock_key).await;

        if !self.store.directory_exists(&dir) {
            if let Err(source) = self.store.create_directory(&dir) {
                tracing::error!("error creating directory {}: {}", dir.display(), source);
                file.is_saved_locally = Some(false);
                return Err(FetchError::DirectoryCreateFailed {
                    file: Box::new(file),
                    path: dir,
                    source,
                });
            }
            tracing::debug!("created directory {}", dir.display());
        }

        let Some(final_path) = final_path else {
            tracing::error!(name = ?file.name, "no usable file name to save under");
            file.is_saved_locally = Some(false);
            return Err(FetchError::WriteFailed {
                file: Box::new(file),
                path: dir,
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "missing or invalid file name",
                ),
            });
        };

        let data = file.file_data.as_deref().unwrap_or_default();
        if let Err(source) = self.store.write_atomic(&final_path, data) {
            tracing::error!("error writing {}: {}", final_path.display(), source);
            file.is_saved_locally = Some(false);
            return Err(FetchError::WriteFailed {
                file: Box::new(file),
                path: final_path,
                source,
            });
        }

        file.is_saved_locally = Some(true);
        tracing::info!(bytes = data.len(), "saved {}", final_path.display());
        Ok(file)
    }
}
