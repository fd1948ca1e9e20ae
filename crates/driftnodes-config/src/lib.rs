//! Configuration for the driftnodes background.
//!
//! Settings are read once at startup from a TOML file. A missing file is not
//! an error; every field has a default matching the stock animation.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use driftnodes_core::{
    DEFAULT_BURST_COUNT, DEFAULT_BURST_STAGGER_MS, DEFAULT_SPAWN_INTERVAL_MS, Rgb,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "DRIFTNODES_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub spawn: SpawnConfig,
    pub render: RenderConfig,
    pub behavior: BehaviorConfig,
}

/// When and how many nodes are spawned.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpawnConfig {
    /// Period of the continuous spawner.
    pub interval_ms: u64,
    /// Nodes spawned at startup.
    pub burst_count: u32,
    /// Delay between startup spawns.
    pub burst_stagger_ms: u64,
    /// Upper bound on concurrently live nodes. Unbounded when absent.
    pub max_live_nodes: Option<usize>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_SPAWN_INTERVAL_MS,
            burst_count: DEFAULT_BURST_COUNT,
            burst_stagger_ms: DEFAULT_BURST_STAGGER_MS,
            max_live_nodes: None,
        }
    }
}

/// Terminal rendering settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Pixel width of one terminal cell.
    pub cell_width_px: u16,
    /// Pixel height of one terminal cell.
    pub cell_height_px: u16,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// Color nodes fade into, as `[r, g, b]`.
    pub background: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_width_px: 8,
            cell_height_px: 16,
            frame_interval_ms: 16,
            background: [11, 17, 32],
        }
    }
}

impl RenderConfig {
    pub fn background_rgb(&self) -> Rgb {
        let [r, g, b] = self.background;
        Rgb(r, g, b)
    }
}

/// Runtime behavior toggles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    /// Freeze the animation while the terminal is unfocused.
    pub pause_on_focus_loss: bool,
    /// Show the key help line at startup.
    pub show_help: bool,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            pause_on_focus_loss: true,
            show_help: true,
            seed: None,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Uses `$DRIFTNODES_CONFIG` when set, otherwise `config.toml` in the
    /// platform config directory.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                debug!("no config directory available, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "spawn.interval_ms must be greater than zero".into(),
            ));
        }
        if self.spawn.max_live_nodes == Some(0) {
            return Err(ConfigError::Invalid(
                "spawn.max_live_nodes must be at least 1 when set".into(),
            ));
        }
        if self.render.cell_width_px == 0 || self.render.cell_height_px == 0 {
            return Err(ConfigError::Invalid(
                "render cell dimensions must be greater than zero".into(),
            ));
        }
        if self.render.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "render.frame_interval_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "driftnodes")
}

/// Resolved config file path.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Directory for runtime files such as the log.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}
