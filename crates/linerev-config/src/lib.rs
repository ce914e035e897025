use linerev_engine::{
    CollisionPolicy, DEFAULT_READ_CHUNK_SIZE, DEFAULT_WRITE_BUFFER_SIZE, ReverseOptions,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Persisted defaults for the CLI. Every field is optional in the TOML file;
/// CLI flags override whatever is loaded here.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `linerev sample` writes its fixture files.
    pub sample_dir: PathBuf,
    pub read_chunk_size: usize,
    pub write_buffer_size: usize,
    pub retain_empty_lines: bool,
    pub on_collision: CollisionPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_dir: PathBuf::from("~/linerev-samples"),
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            write_buffer_size: DEFAULT_WRITE_BUFFER_SIZE,
            retain_empty_lines: false,
            on_collision: CollisionPolicy::default(),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded sample directory
        config.sample_dir = Self::expand_path(&config.sample_dir).unwrap_or(config.sample_dir);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/linerev");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Engine options built from the persisted defaults.
    pub fn options(&self) -> ReverseOptions {
        ReverseOptions {
            read_chunk_size: self.read_chunk_size,
            write_buffer_size: self.write_buffer_size,
            retain_empty_lines: self.retain_empty_lines,
            on_collision: self.on_collision,
        }
    }

    /// Sample directory with tilde and environment variables expanded.
    pub fn expanded_sample_dir(&self) -> PathBuf {
        Self::expand_path(&self.sample_dir).unwrap_or_else(|| self.sample_dir.clone())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
