//! Per-path write locks so overlapping fetches on one fetcher never interleave
//! directory creation and writes for the same destination.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::sync::OwnedMutexGuard;

/// Registry of destination path -> async mutex. Entries nobody holds are
/// pruned on the next acquire.
#[derive(Default)]
pub(crate) struct PathLocks {
    paths: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl PathLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn entry(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        let mut paths = self.paths.lock().unwrap_or_else(|e| e.into_inner());
        paths.retain(|_, m| Arc::strong_count(m) > 1);
        Arc::clone(paths.entry(path.to_path_buf()).or_default())
    }

    /// Wait until no other fetch holds `path`, then hold it until the guard drops.
    pub(crate) async fn lock(&self, path: &Path) -> OwnedMutexGuard<()> {
        self.entry(path).lock_owned().await
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.paths.lock().unwrap().len()
    }
}
