//! `dropfetch config` – show where the config lives and what is in effect.

use anyhow::Result;
use dropfetch_core::config::{self, FetcherConfig};

pub fn run_config(cfg: &FetcherConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    print!("{}", config::to_toml(cfg)?);
    let roots = cfg.roots()?;
    println!("# document root: {}", roots.document.display());
    println!("# library root: {}", roots.library.display());
    Ok(())
}
