use serde::{Deserialize, Serialize};

pub const DEFAULT_READ_CHUNK_SIZE: usize = 16 * 1024;
pub const DEFAULT_WRITE_BUFFER_SIZE: usize = 8 * 1024;

/// What to do when the destination path already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// Refuse to write and report an error.
    #[default]
    Fail,
    /// Truncate the existing file and write over it.
    Overwrite,
    /// Leave the existing file alone and write to a numbered sibling path.
    Version,
}

/// Tuning and policy knobs for one reversal, passed explicitly at call time.
///
/// The two sizes affect performance only; the offset table is identical for
/// any `read_chunk_size >= 1`. `retain_empty_lines` decides whether blank
/// lines survive reversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseOptions {
    /// Bytes per read during the index scan. Zero is rejected.
    pub read_chunk_size: usize,
    /// Capacity of the buffered writer on the destination file.
    pub write_buffer_size: usize,
    /// Keep blank lines (spans holding only terminator bytes) in the table.
    pub retain_empty_lines: bool,
    /// Behaviour when the destination path already exists.
    pub on_collision: CollisionPolicy,
}

impl Default for ReverseOptions {
    fn default() -> Self {
        Self {
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
            retain_empty_lines: false,
            on_collision: CollisionPolicy::default(),
        }
    }
}
