//! Filesystem boundary: directory checks/creation and atomic file writes.

mod writer;

pub use writer::AtomicWriter;

use std::io;
use std::path::Path;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path
/// (e.g. `photo.png` → `photo.png.part`).
pub fn temp_path(final_path: &Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}

/// Local filesystem operations the fetcher needs.
pub trait FileStore: Send + Sync {
    fn directory_exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing parents.
    fn create_directory(&self, path: &Path) -> io::Result<()>;

    /// Replace `path` with `data` so it is never observed partially written.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}

/// [`FileStore`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileStore for LocalFs {
    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_directory(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_atomic(&self, path: &Path, data: &[u8]) -> io::Result<()> {
        let mut writer = AtomicWriter::create(path)?;
        let temp = writer.temp_path().to_path_buf();
        let result = writer
            .preallocate(data.len() as u64)
            .and_then(|()| writer.write_all(data))
            .and_then(|()| writer.sync())
            .and_then(|()| writer.finalize());
        if let Err(e) = &result {
            tracing::debug!(error = %e, "atomic write failed, removing {}", temp.display());
            let _ = std::fs::remove_file(&temp);
        }
        result
    }
}
