use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::info;

const ASCII_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
/// Currency symbols, two to four bytes each, for exercising the index
/// scan's high-bit handling.
const MULTIBYTE_ALPHABET: &str = "¥·£·€·$·¢·₡·₢·₣·₤·₥·₦·₧·₨·₩·₪·₫·₭·₮·₯·₹";

/// Generates `count` fixture files of `lines` numbered lines each, every
/// line carrying a run of one repeated letter of random width.
pub fn run(
    dir: &Path,
    lines: usize,
    count: usize,
    multibyte: bool,
    seed: Option<u64>,
    write_buffer_size: usize,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("creating sample directory {}", dir.display()))?;

    let mut alphabet: Vec<char> = ASCII_ALPHABET.chars().collect();
    if multibyte {
        alphabet.extend(MULTIBYTE_ALPHABET.chars());
    }
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();

    let mut written = Vec::with_capacity(count);
    for k in 0..count {
        let path = dir.join(format!("sample_{stamp}_{k}.txt"));
        let started = std::time::Instant::now();
        write_sample(&path, lines, &alphabet, &mut rng, write_buffer_size)
            .with_context(|| format!("writing sample file {}", path.display()))?;
        info!(path = %path.display(), lines, elapsed = ?started.elapsed(), "created sample file");
        println!("Created {} ({} lines)", path.display(), lines);
        written.push(path);
    }

    Ok(written)
}

fn write_sample(
    path: &Path,
    lines: usize,
    alphabet: &[char],
    rng: &mut SmallRng,
    write_buffer_size: usize,
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::with_capacity(write_buffer_size, file);
    for i in 0..lines {
        let letter = alphabet[i % alphabet.len()];
        let width = rng.gen_range(900..1200);
        let run: String = std::iter::repeat(letter).take(width).collect();
        writeln!(writer, "{i} - {run}")?;
    }
    writer.flush()?;
    Ok(())
}
