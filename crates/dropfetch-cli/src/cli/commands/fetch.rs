//! `dropfetch fetch` – pick one remote file and save it.

use anyhow::{Context, Result};
use dropfetch_core::chooser::{Chooser, StaticChooser};
use dropfetch_core::config::FetcherConfig;
use dropfetch_core::paths::RootKind;
use dropfetch_core::{
    ChooserResult, DownloadPolicy, FetchError, RemoteFile, RemoteFileFetcher, TargetDir,
};
use std::sync::Arc;

use super::list::print_listing;
use crate::cli::listing::ListingChooser;
use crate::cli::terminal::TerminalAlerter;
use crate::cli::FetchArgs;

pub async fn run_fetch(cfg: &FetcherConfig, args: FetchArgs) -> Result<()> {
    let target = target_from_args(cfg, &args);
    let policy = policy_from_args(cfg, &args);
    let chooser = chooser_from_args(args)?;

    let fetcher = RemoteFileFetcher::builder(chooser, Arc::new(TerminalAlerter))
        .config(cfg)?
        .build()?;
    tracing::info!(?target, ?policy, "starting fetch");

    let file = fetch_outcome(fetcher.fetch(&target, &policy).await)?;
    let saved = file.saved_path().unwrap_or_else(|| file.local_path.clone());
    println!("{:#?}", file);
    println!("Saved to {}", saved.display());
    print_listing(fetcher.roots())?;
    Ok(())
}

/// Every failure kind, cancellation included, makes the command fail.
fn fetch_outcome(result: Result<RemoteFile, FetchError>) -> Result<RemoteFile> {
    result.map_err(|err| anyhow::anyhow!("fetch failed ({:?}): {}", err.kind(), err))
}

/// Root from the flags, falling back to the configured default target.
pub(crate) fn target_from_args(cfg: &FetcherConfig, args: &FetchArgs) -> TargetDir {
    let default = cfg.default_target();
    let kind = if args.library {
        RootKind::Library
    } else if args.document {
        RootKind::Document
    } else {
        default.kind()
    };
    let sub_path = args
        .path
        .clone()
        .unwrap_or_else(|| default.sub_path().to_string());
    TargetDir::new(kind, sub_path)
}

pub(crate) fn policy_from_args(cfg: &FetcherConfig, args: &FetchArgs) -> DownloadPolicy {
    let base = cfg.policy();
    let max_size_mb = args.max_size_mb.unwrap_or(base.max_size_mb);
    if args.restrict.is_empty() {
        DownloadPolicy { max_size_mb, ..base }
    } else {
        DownloadPolicy::new(max_size_mb, &args.restrict)
    }
}

fn chooser_from_args(args: FetchArgs) -> Result<Arc<dyn Chooser>> {
    if let Some(path) = args.listing {
        return Ok(Arc::new(ListingChooser::from_file(&path)?));
    }
    let link = args.link.context("either --listing or --link is required")?;
    Ok(Arc::new(StaticChooser::new(vec![ChooserResult {
        link: Some(link),
        name: args.name,
        size: args.size,
        icon_link: args.icon,
    }])))
}
