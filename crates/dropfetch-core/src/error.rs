//! Fetch pipeline errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::remote_file::RemoteFile;
use crate::transport::TransportError;

/// Copyable tag for a [`FetchError`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    SelectionCancelled,
    SizeRejected,
    TypeRejected,
    DownloadFailed,
    DirectoryCreateFailed,
    WriteFailed,
}

/// Why the download stage produced no bytes.
#[derive(Debug, Error)]
pub enum DownloadFailure {
    #[error("no download link")]
    MissingLink,
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("empty body")]
    Empty,
    #[error("download worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

/// Failure of one fetch. Every variant but `SelectionCancelled` hands back the
/// record as far as it got.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("selection cancelled")]
    SelectionCancelled,

    #[error("{message}")]
    SizeRejected {
        file: Box<RemoteFile>,
        message: String,
    },

    #[error("{message}")]
    TypeRejected {
        file: Box<RemoteFile>,
        message: String,
    },

    #[error("download failed: {source}")]
    DownloadFailed {
        file: Box<RemoteFile>,
        #[source]
        source: DownloadFailure,
    },

    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        file: Box<RemoteFile>,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteFailed {
        file: Box<RemoteFile>,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::SelectionCancelled => FetchErrorKind::SelectionCancelled,
            FetchError::SizeRejected { .. } => FetchErrorKind::SizeRejected,
            FetchError::TypeRejected { .. } => FetchErrorKind::TypeRejected,
            FetchError::DownloadFailed { .. } => FetchErrorKind::DownloadFailed,
            FetchError::DirectoryCreateFailed { .. } => FetchErrorKind::DirectoryCreateFailed,
            FetchError::WriteFailed { .. } => FetchErrorKind::WriteFailed,
        }
    }

    /// The partially populated record, if the pipeline got past selection.
    pub fn file(&self) -> Option<&RemoteFile> {
        match self {
            FetchError::SelectionCancelled => None,
            FetchError::SizeRejected { file, .. }
            | FetchError::TypeRejected { file, .. }
            | FetchError::DownloadFailed { file, .. }
            | FetchError::DirectoryCreateFailed { file, .. }
            | FetchError::WriteFailed { file, .. } => Some(file),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote_file::ChooserResult;

    #[test]
    fn cancelled_has_no_file() {
        let e = FetchError::SelectionCancelled;
        assert_eq!(e.kind(), FetchErrorKind::SelectionCancelled);
        assert!(e.file().is_none());
    }

    #[test]
    fn write_failed_carries_file_and_source() {
        let file = RemoteFile::from_selection(ChooserResult {
            name: Some("a.bin".to_string()),
            ..Default::default()
        });
        let e = FetchError::WriteFailed {
            file: Box::new(file),
            path: PathBuf::from("/d/a.bin"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        };
        assert_eq!(e.kind(), FetchErrorKind::WriteFailed);
        assert_eq!(e.file().unwrap().name.as_deref(), Some("a.bin"));
        let msg = e.to_string();
        assert!(msg.contains("/d/a.bin"));
        assert!(msg.contains("disk full"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
