//! Chooser interface: the picker that lets a user select a remote file.
//!
//! The fetcher only depends on this trait and does not know which provider
//! or UI sits behind it.

use crate::remote_file::ChooserResult;

/// Kind of link the chooser should hand back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkType {
    /// Link that serves the bytes directly, no further auth step.
    #[default]
    Direct,
    /// Link to a preview page.
    Preview,
}

/// What the fetcher asks of a chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChooserRequest {
    pub link_type: LinkType,
    /// Allow selecting more than one file.
    pub multiple: bool,
}

impl ChooserRequest {
    /// Single file, direct link.
    pub fn single_direct() -> Self {
        Self {
            link_type: LinkType::Direct,
            multiple: false,
        }
    }
}

/// Presents a selection UI and reports what was picked.
///
/// An empty `Vec` means the user cancelled.
pub trait Chooser: Send + Sync {
    fn choose(&self, request: &ChooserRequest) -> anyhow::Result<Vec<ChooserResult>>;
}

/// Chooser that always returns the same results. Useful when the selection is
/// already known (links passed on the command line, tests).
#[derive(Debug, Clone, Default)]
pub struct StaticChooser {
    results: Vec<ChooserResult>,
}

impl StaticChooser {
    pub fn new(results: Vec<ChooserResult>) -> Self {
        Self { results }
    }

    /// Chooser that behaves like a cancelled selection.
    pub fn cancelled() -> Self {
        Self::default()
    }
}

impl Chooser for StaticChooser {
    fn choose(&self, _request: &ChooserRequest) -> anyhow::Result<Vec<ChooserResult>> {
        Ok(self.results.clone())
    }
}
