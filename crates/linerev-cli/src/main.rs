mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use linerev_config::Config;

fn init_tracing(cli: &Cli) {
    // CLI tracing policy:
    //   --quiet   → always "off"
    //   --verbose → "info", honouring RUST_LOG if set
    //   default   → "off" (clean terminal; results go to stdout)
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Reverse {
            files,
            output,
            on_collision,
            chunk_size,
            write_buffer,
            keep_empty_lines,
        } => {
            let mut options = config.options();
            if let Some(size) = chunk_size {
                options.read_chunk_size = size;
            }
            if let Some(size) = write_buffer {
                options.write_buffer_size = size;
            }
            if keep_empty_lines {
                options.retain_empty_lines = true;
            }
            if let Some(policy) = on_collision {
                options.on_collision = policy.into();
            }
            commands::reverse::run(&files, output.as_deref(), &options)
        }
        Commands::Sample {
            dir,
            lines,
            count,
            multibyte,
            seed,
        } => {
            let dir = dir.unwrap_or_else(|| config.expanded_sample_dir());
            commands::sample::run(&dir, lines, count, multibyte, seed, config.write_buffer_size)
                .map(|_| ())
        }
        Commands::Clean { dir, yes } => {
            let dir = dir.unwrap_or_else(|| config.expanded_sample_dir());
            commands::clean::run(&dir, yes)
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    let loaded = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    Ok(loaded.unwrap_or_default())
}
