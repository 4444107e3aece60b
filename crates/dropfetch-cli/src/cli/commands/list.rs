//! `dropfetch list` – show what is stored under the document and library roots.

use anyhow::Result;
use dropfetch_core::config::FetcherConfig;
use dropfetch_core::paths::Roots;
use std::io;
use std::path::Path;

pub fn run_list(cfg: &FetcherConfig) -> Result<()> {
    print_listing(&cfg.roots()?)
}

pub(crate) fn print_listing(roots: &Roots) -> Result<()> {
    println!("Document = {:?}", subpaths(&roots.document)?);
    println!("Library = {:?}", subpaths(&roots.library)?);
    Ok(())
}

/// Every file and directory below `root`, relative to it, sorted. A missing
/// root lists as empty.
pub(crate) fn subpaths(root: &Path) -> io::Result<Vec<String>> {
    let mut out = Vec::new();
    if root.is_dir() {
        walk(root, root, &mut out)?;
    }
    out.sort();
    Ok(out)
}

fn walk(root: &Path, dir: &Path, out: &mut Vec<String>) -> io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if let Ok(rel) = path.strip_prefix(root) {
            out.push(rel.to_string_lossy().into_owned());
        }
        if entry.file_type()?.is_dir() {
            walk(root, &path, out)?;
        }
    }
    Ok(())
}
