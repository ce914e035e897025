//! Write phase: replays a line offset table last span to first, copying each
//! span's bytes untouched into a freshly created destination file.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::ReverseError;
use crate::index::{LineOffsetTable, index_file};
use crate::options::{CollisionPolicy, ReverseOptions};

/// Destination derived from the source: `reversed_<name>` in the same
/// directory.
pub fn default_output_path(source: &Path) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    source.with_file_name(format!("reversed_{name}"))
}

/// Indexes `source` and writes its reversal alongside it. Returns the
/// destination path actually written.
pub fn reverse_file(source: &Path, options: &ReverseOptions) -> Result<PathBuf, ReverseError> {
    reverse_file_to(source, &default_output_path(source), options)
}

/// Two-phase reversal to an explicit destination: the index pass runs to
/// completion first, then the reverse copy. No output is produced before the
/// scan has finished, since a line's length is only known once the next
/// boundary is.
pub fn reverse_file_to(
    source: &Path,
    dest: &Path,
    options: &ReverseOptions,
) -> Result<PathBuf, ReverseError> {
    let table = index_file(source, options)?;
    write_reversed(source, &table, dest, options)
}

/// Copies each span of `table`, last to first, from `source` into `dest`.
///
/// `dest` is created according to `options.on_collision`; the returned path
/// differs from `dest` only under [`CollisionPolicy::Version`]. Bytes are
/// copied verbatim, with no decoding or trimming, through a write buffer of
/// `options.write_buffer_size`.
pub fn write_reversed(
    source: &Path,
    table: &LineOffsetTable,
    dest: &Path,
    options: &ReverseOptions,
) -> Result<PathBuf, ReverseError> {
    let mut reader = File::open(source).map_err(|e| ReverseError::SourceRead {
        path: source.to_path_buf(),
        offset: 0,
        source: e,
    })?;
    let (dest_file, dest_path) = create_destination(dest, options.on_collision)?;
    let mut writer = BufWriter::with_capacity(options.write_buffer_size, dest_file);

    // One line buffer, regrown only when a longer line comes along.
    let mut line = Vec::new();
    for span in table.spans().iter().rev() {
        reader
            .seek(SeekFrom::Start(span.start))
            .map_err(|e| ReverseError::SourceRead {
                path: source.to_path_buf(),
                offset: span.start,
                source: e,
            })?;
        line.resize(span.len() as usize, 0);
        reader.read_exact(&mut line).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                // The source shrank between the phases; never pad or skip.
                ReverseError::TruncatedRead {
                    path: source.to_path_buf(),
                    offset: span.start,
                    expected: span.len(),
                }
            } else {
                ReverseError::SourceRead {
                    path: source.to_path_buf(),
                    offset: span.start,
                    source: e,
                }
            }
        })?;
        writer
            .write_all(&line)
            .map_err(|e| ReverseError::DestinationWrite {
                path: dest_path.clone(),
                source: e,
            })?;
    }
    writer.flush().map_err(|e| ReverseError::DestinationWrite {
        path: dest_path.clone(),
        source: e,
    })?;
    Ok(dest_path)
}

fn create_destination(
    dest: &Path,
    policy: CollisionPolicy,
) -> Result<(File, PathBuf), ReverseError> {
    match policy {
        CollisionPolicy::Overwrite => {
            let file = File::create(dest).map_err(|e| ReverseError::DestinationWrite {
                path: dest.to_path_buf(),
                source: e,
            })?;
            Ok((file, dest.to_path_buf()))
        }
        // create_new makes the existence check and the create one atomic
        // open, for both remaining policies.
        CollisionPolicy::Fail => match OpenOptions::new().write(true).create_new(true).open(dest) {
            Ok(file) => Ok((file, dest.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(ReverseError::DestinationExists(dest.to_path_buf()))
            }
            Err(e) => Err(ReverseError::DestinationWrite {
                path: dest.to_path_buf(),
                source: e,
            }),
        },
        CollisionPolicy::Version => {
            let mut candidate = dest.to_path_buf();
            let mut counter = 0u32;
            loop {
                match OpenOptions::new()
                    .write(true)
                    .create_new(true)
                    .open(&candidate)
                {
                    Ok(file) => return Ok((file, candidate)),
                    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                        counter += 1;
                        candidate = versioned_path(dest, counter);
                    }
                    Err(e) => {
                        return Err(ReverseError::DestinationWrite {
                            path: candidate,
                            source: e,
                        });
                    }
                }
            }
        }
    }
}

/// `out.txt` becomes `out.1.txt`, an extensionless `out` becomes `out.1`.
fn versioned_path(dest: &Path, counter: u32) -> PathBuf {
    let stem = dest
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    match dest.extension() {
        Some(ext) => dest.with_file_name(format!("{stem}.{counter}.{}", ext.to_string_lossy())),
        None => dest.with_file_name(format!("{stem}.{counter}")),
    }
}
