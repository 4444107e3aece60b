//! Temp-file writer that lands on its final path with a rename.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

use super::temp_path;

/// Writes into `<final>.part`; `finalize` renames it over the final path, so
/// readers of the final path see either the old file or the complete new one.
pub struct AtomicWriter {
    file: File,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl AtomicWriter {
    /// Create (or truncate) the temp file next to `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(AtomicWriter {
            file,
            temp_path,
            final_path: final_path.to_path_buf(),
        })
    }

    /// Reserve `size` bytes up front so a full disk fails here, before any
    /// payload is written. Uses `posix_fallocate` on Unix, `set_len` otherwise.
    pub fn preallocate(&mut self, size: u64) -> io::Result<()> {
        #[cfg(unix)]
        {
            let fd = self.file.as_raw_fd();
            let r = unsafe { libc::posix_fallocate(fd, 0, size as libc::off_t) };
            if r == 0 {
                return Ok(());
            }
            if r == libc::ENOSPC {
                return Err(io::Error::from_raw_os_error(r));
            }
            tracing::debug!(errno = r, "posix_fallocate failed, falling back to set_len");
        }
        self.file.set_len(size)
    }

    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.file.flush()
    }

    pub fn sync(&self) -> io::Result<()> {
        self.file.sync_all()
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Rename the temp file over the final path. Consumes the writer and closes the file.
    pub fn finalize(self) -> io::Result<()> {
        let AtomicWriter {
            file,
            temp_path,
            final_path,
        } = self;
        drop(file);
        std::fs::rename(&temp_path, &final_path)
    }
}
