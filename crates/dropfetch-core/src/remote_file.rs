//! Remote file record built from a chooser selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// One record returned by a chooser for a selected remote file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChooserResult {
    /// Direct link to the file bytes.
    #[serde(default)]
    pub link: Option<Url>,
    /// File name including extension.
    #[serde(default)]
    pub name: Option<String>,
    /// Size in bytes as reported by the provider.
    #[serde(default)]
    pub size: Option<u64>,
    /// Thumbnail/icon link.
    #[serde(default)]
    pub icon_link: Option<Url>,
}

/// A remote file moving through the fetch pipeline.
///
/// Created per selection and handed back to the caller once (inside `Ok` or
/// inside the `FetchError`); it is never reused for a later fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub download_link: Option<Url>,
    pub name: Option<String>,
    pub size_bytes: Option<u64>,
    pub icon_url: Option<Url>,
    /// Target directory (not the full file path); empty until resolved.
    pub local_path: PathBuf,
    /// Raw bytes, set only after a successful download.
    pub file_data: Option<Vec<u8>>,
    /// `None` until the save step has run.
    pub is_saved_locally: Option<bool>,
}

impl RemoteFile {
    pub fn from_selection(result: ChooserResult) -> Self {
        Self {
            download_link: result.link,
            name: result.name,
            size_bytes: result.size,
            icon_url: result.icon_link,
            local_path: PathBuf::new(),
            file_data: None,
            is_saved_locally: None,
        }
    }

    /// Extension derived from `name` (see [`extension_of`]).
    pub fn extension(&self) -> &str {
        extension_of(self.name.as_deref())
    }

    /// Full path the file is saved to. `None` when the name is missing or
    /// cannot be used as a file name.
    pub fn saved_path(&self) -> Option<PathBuf> {
        let name = crate::paths::safe_file_name(self.name.as_deref()?)?;
        Some(crate::paths::join_collapsed(&self.local_path, &name))
    }
}

// Manual impl so a downloaded payload doesn't flood logs.
impl fmt::Debug for RemoteFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteFile")
            .field("download_link", &self.download_link.as_ref().map(Url::as_str))
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .field("icon_url", &self.icon_url.as_ref().map(Url::as_str))
            .field("local_path", &self.local_path)
            .field("file_data", &self.file_data.as_ref().map(|d| d.len()))
            .field("is_saved_locally", &self.is_saved_locally)
            .finish()
    }
}

/// Substring after the last `.` of `name`; empty when there is no `.` or no name.
pub fn extension_of(name: Option<&str>) -> &str {
    match name.and_then(|n| n.rsplit_once('.')) {
        Some((_, ext)) => ext,
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_after_last_dot() {
        assert_eq!(extension_of(Some("photo.png")), "png");
        assert_eq!(extension_of(Some("archive.tar.gz")), "gz");
        assert_eq!(extension_of(Some(".bashrc")), "bashrc");
        assert_eq!(extension_of(Some("trailing.")), "");
    }

    #[test]
    fn extension_empty_without_dot_or_name() {
        assert_eq!(extension_of(Some("README")), "");
        assert_eq!(extension_of(Some("")), "");
        assert_eq!(extension_of(None), "");
    }

    #[test]
    fn from_selection_starts_unsaved() {
        let result = ChooserResult {
            link: Some(Url::parse("https://dl.example.com/s/abc/photo.png").unwrap()),
            name: Some("photo.png".to_string()),
            size: Some(5_000_000),
            icon_link: None,
        };
        let mut file = RemoteFile::from_selection(result);
        assert!(file.local_path.as_os_str().is_empty());
        file.local_path = PathBuf::from("/tmp/docs");
        assert_eq!(file.extension(), "png");
        assert!(file.file_data.is_none());
        assert!(file.is_saved_locally.is_none());
        assert_eq!(file.saved_path(), Some(PathBuf::from("/tmp/docs/photo.png")));
    }

    #[test]
    fn saved_path_rejects_unusable_names() {
        let mut file = RemoteFile::from_selection(ChooserResult {
            name: Some("..".to_string()),
            ..Default::default()
        });
        file.local_path = PathBuf::from("/tmp/docs");
        assert!(file.saved_path().is_none());
        file.name = None;
        assert!(file.saved_path().is_none());
    }

    #[test]
    fn chooser_result_from_json_with_missing_fields() {
        let json = r#"{ "link": "https://dl.example.com/a.pdf", "name": "a.pdf" }"#;
        let r: ChooserResult = serde_json::from_str(json).unwrap();
        assert_eq!(r.name.as_deref(), Some("a.pdf"));
        assert!(r.size.is_none());
        assert!(r.icon_link.is_none());
    }

    #[test]
    fn debug_hides_payload() {
        let mut file = RemoteFile::from_selection(ChooserResult::default());
        file.file_data = Some(vec![0u8; 4096]);
        let s = format!("{:?}", file);
        assert!(s.contains("Some(4096)"));
    }
}
