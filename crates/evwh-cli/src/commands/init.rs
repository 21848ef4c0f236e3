//! Init command implementation - writes a default evwh.yml

use anyhow::{Context, Result};
use evwh_core::config::CONFIG_FILE_NAMES;
use evwh_core::Config;
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) fn execute(args: &InitArgs) -> Result<()> {
    let dir = Path::new(&args.dir);
    let path = dir.join(CONFIG_FILE_NAMES[0]);

    if path.exists() && !args.force {
        anyhow::bail!(
            "'{}' already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    let content = Config::default()
        .to_yaml()
        .context("Failed to render default config")?;
    fs::write(&path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("  ✓ Wrote {}", path.display());
    Ok(())
}
