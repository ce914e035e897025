pub mod error;
pub mod index;
pub mod options;
pub mod reverse;


// Re-export key types for easier usage
pub use error::ReverseError;
pub use index::{LineOffsetIndexer, LineOffsetTable, LineSpan, index_file};
pub use options::{
    CollisionPolicy, DEFAULT_READ_CHUNK_SIZE, DEFAULT_WRITE_BUFFER_SIZE, ReverseOptions,
};
pub use reverse::{default_output_path, reverse_file, reverse_file_to, write_reversed};
