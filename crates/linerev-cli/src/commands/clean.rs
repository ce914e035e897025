use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::info;

/// Removes the sample directory recursively. Requires explicit confirmation.
pub fn run(dir: &Path, yes: bool) -> Result<()> {
    if !yes {
        bail!(
            "refusing to delete {} without --yes; pass --yes to confirm",
            dir.display()
        );
    }
    if !dir.exists() {
        println!("Nothing to clean at {}", dir.display());
        return Ok(());
    }

    fs::remove_dir_all(dir).with_context(|| format!("removing {}", dir.display()))?;
    info!(dir = %dir.display(), "removed sample directory");
    println!("Removed {}", dir.display());
    Ok(())
}
