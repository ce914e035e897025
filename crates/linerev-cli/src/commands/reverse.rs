use anyhow::{Context, Result, bail};
use linerev_engine::{ReverseOptions, default_output_path, index_file, write_reversed};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Reverses each source file in sequence: full index pass, then the reverse
/// copy, one file at a time.
pub fn run(files: &[PathBuf], output: Option<&Path>, options: &ReverseOptions) -> Result<()> {
    if output.is_some() && files.len() > 1 {
        bail!("--output can only be used with a single source file");
    }
    debug!(?options, "resolved reversal options");

    for file in files {
        let started = Instant::now();

        let table =
            index_file(file, options).with_context(|| format!("indexing {}", file.display()))?;
        let dest = match output {
            Some(path) => path.to_path_buf(),
            None => default_output_path(file),
        };
        let written = write_reversed(file, &table, &dest, options)
            .with_context(|| format!("reversing {}", file.display()))?;

        let elapsed = started.elapsed();
        info!(
            source = %file.display(),
            dest = %written.display(),
            lines = table.line_count(),
            ?elapsed,
            "reversed file"
        );
        println!(
            "Reversed {} -> {} ({} lines in {:.2?})",
            file.display(),
            written.display(),
            table.line_count(),
            elapsed
        );
    }

    Ok(())
}
