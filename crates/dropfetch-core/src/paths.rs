//! Local target directory resolution.
//!
//! A target is a well-known root (library or document) plus a caller-supplied
//! sub-path. Roots are resolved at call time and joined with the sub-path by
//! string concatenation; runs of `/` are collapsed so the result never carries
//! a doubled separator whatever leading/trailing slashes either side has.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::storage::TEMP_SUFFIX;

/// Which well-known root a target lives under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RootKind {
    Library,
    #[default]
    Document,
}

/// Where a fetched file is saved: root + sub-path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetDir {
    Library(String),
    Document(String),
}

impl Default for TargetDir {
    fn default() -> Self {
        TargetDir::Document(String::new())
    }
}

impl TargetDir {
    pub fn new(kind: RootKind, sub_path: impl Into<String>) -> Self {
        match kind {
            RootKind::Library => TargetDir::Library(sub_path.into()),
            RootKind::Document => TargetDir::Document(sub_path.into()),
        }
    }

    pub fn kind(&self) -> RootKind {
        match self {
            TargetDir::Library(_) => RootKind::Library,
            TargetDir::Document(_) => RootKind::Document,
        }
    }

    pub fn sub_path(&self) -> &str {
        match self {
            TargetDir::Library(p) | TargetDir::Document(p) => p,
        }
    }

    /// Directory path for this target under `roots`.
    pub fn resolve(&self, roots: &Roots) -> PathBuf {
        join_collapsed(roots.get(self.kind()), self.sub_path())
    }
}

/// The two well-known roots targets resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roots {
    pub library: PathBuf,
    pub document: PathBuf,
}

impl Roots {
    /// Platform defaults: XDG data home (`~/.local/share/dropfetch`) for the
    /// library root, the user's documents directory for the document root.
    pub fn platform() -> Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("dropfetch")
            .context("resolve XDG base directories")?;
        let library = xdg_dirs.get_data_home();
        let document = match dirs::document_dir() {
            Some(d) => d,
            None => dirs::home_dir()
                .map(|h| h.join("Documents"))
                .context("no documents directory and no home directory")?,
        };
        Ok(Self { library, document })
    }

    pub fn get(&self, kind: RootKind) -> &Path {
        match kind {
            RootKind::Library => &self.library,
            RootKind::Document => &self.document,
        }
    }
}

/// Joins `base` and `tail` with `/` and collapses separator runs. Works on the
/// raw bytes of `base`, so non-UTF-8 roots are kept as they are.
#[cfg(unix)]
pub fn join_collapsed(base: &Path, tail: &str) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let mut joined = base.as_os_str().as_bytes().to_vec();
    joined.push(b'/');
    joined.extend_from_slice(tail.as_bytes());
    PathBuf::from(OsString::from_vec(collapse_bytes(&joined)))
}

#[cfg(not(unix))]
pub fn join_collapsed(base: &Path, tail: &str) -> PathBuf {
    let joined = format!("{}/{}", base.to_string_lossy(), tail);
    PathBuf::from(collapse_separators(&joined))
}

/// Replaces every run of `/` with a single `/` and drops a trailing one
/// (except for the filesystem root itself).
pub fn collapse_separators(path: &str) -> String {
    // Only ASCII `/` bytes are removed, so the result is still UTF-8.
    String::from_utf8_lossy(&collapse_bytes(path.as_bytes())).into_owned()
}

fn collapse_bytes(path: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(path.len());
    let mut prev_sep = false;
    for &b in path {
        if b == b'/' {
            if !prev_sep {
                out.push(b'/');
            }
            prev_sep = true;
        } else {
            out.push(b);
            prev_sep = false;
        }
    }
    if out.len() > 1 && out.ends_with(b"/") {
        out.pop();
    }
    out
}

/// Makes a provider-supplied name safe to use as a single path component.
///
/// - Replaces NUL, `/`, `\` and control characters with `_`
/// - Returns `None` for empty names and for `.` / `..`
/// - Returns `None` when `<name>.part` would exceed NAME_MAX (255 bytes).
///   Names are never shortened: the extension checked by the policy must be
///   the one the file is saved with.
pub fn safe_file_name(name: &str) -> Option<String> {
    const NAME_MAX: usize = 255;

    let out: String = name
        .chars()
        .map(|c| {
            if c == '\0' || c == '/' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if out.is_empty() || out == "." || out == ".." {
        return None;
    }
    if out.len() > NAME_MAX - TEMP_SUFFIX.len() {
        return None;
    }
    Some(out)
}
