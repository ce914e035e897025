use clap::{Parser, Subcommand, ValueEnum};
use linerev_engine::CollisionPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linerev", about = "Reverse the line order of large text files", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reverse the line order of one or more files
    Reverse {
        /// Source files, processed sequentially
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Destination path (single source only; default: reversed_<name> next to the source)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// What to do when the destination already exists
        #[arg(long, value_enum)]
        on_collision: Option<CollisionArg>,

        /// Read chunk size in bytes for the index scan
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Write buffer size in bytes
        #[arg(long)]
        write_buffer: Option<usize>,

        /// Keep blank lines instead of dropping them
        #[arg(long)]
        keep_empty_lines: bool,
    },

    /// Generate synthetic sample files to reverse
    Sample {
        /// Directory for the generated files (default: sample_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Lines per generated file
        #[arg(long, default_value_t = 1000)]
        lines: usize,

        /// Number of files to generate
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Mix multi-byte currency symbols into the line alphabet
        #[arg(long)]
        multibyte: bool,

        /// Seed for deterministic output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Remove the sample directory and everything in it
    Clean {
        /// Directory to remove (default: sample_dir from config)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Confirm the recursive deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CollisionArg {
    /// Refuse to overwrite an existing destination
    Fail,
    /// Truncate an existing destination
    Overwrite,
    /// Write to a numbered sibling path instead
    Version,
}

impl From<CollisionArg> for CollisionPolicy {
    fn from(arg: CollisionArg) -> Self {
        match arg {
            CollisionArg::Fail => CollisionPolicy::Fail,
            CollisionArg::Overwrite => CollisionPolicy::Overwrite,
            CollisionArg::Version => CollisionPolicy::Version,
        }
    }
}
