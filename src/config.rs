//! Configuration file handling for live-dither.
//!
//! Loads configuration from `~/.config/live-dither/config.toml` or a custom
//! path. Every field is optional; settings are resolved with the precedence
//! CLI flags > config file > built-in defaults, and clamped to their valid
//! ranges before they reach the engine.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dither::{Algorithm, DitherSettings, DEFAULT_SEED};
use crate::event_loop::LoopOptions;

pub const DEFAULT_IMAGE: &str = "bg.jpg";
pub const DEFAULT_THRESHOLD: i64 = 40;
pub const DEFAULT_CHAOS: i64 = 10;
pub const DEFAULT_BLOCK_SIZE: i64 = 1;
pub const DEFAULT_MAX_FPS: i64 = 60;
pub const DEFAULT_WIDTH: i64 = 1280;
pub const DEFAULT_HEIGHT: i64 = 720;

/// Where frames are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Output {
    /// Desktop window
    #[default]
    Window,
    /// ANSI true-color terminal
    Terminal,
}

impl Output {
    pub fn name(&self) -> &'static str {
        match self {
            Output::Window => "window",
            Output::Terminal => "terminal",
        }
    }

    /// Most verbose default log level that leaves the output readable.
    pub fn max_log_level(&self) -> log::LevelFilter {
        match self {
            Output::Window => log::LevelFilter::Trace,
            Output::Terminal => log::LevelFilter::Warn,
        }
    }
}

/// Configuration file structure for live-dither.
///
/// Integer fields are read as `i64` so out-of-range values are clamped
/// instead of rejected.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub image: Option<PathBuf>,
    #[serde(default)]
    pub dither: DitherConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DitherConfig {
    pub algorithm: Option<Algorithm>,
    pub threshold: Option<i64>,
    pub chaos: Option<i64>,
    pub seed: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub output: Option<Output>,
    pub block_size: Option<i64>,
    pub max_fps: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub profile: Option<bool>,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load a file the user asked for explicitly; it must exist.
    pub fn load_explicit(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content, path)
    }

    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            Self::load_explicit(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Fill every field unset in `self` from `base`.
    pub fn or(self, base: Config) -> Config {
        Config {
            image: self.image.or(base.image),
            dither: DitherConfig {
                algorithm: self.dither.algorithm.or(base.dither.algorithm),
                threshold: self.dither.threshold.or(base.dither.threshold),
                chaos: self.dither.chaos.or(base.dither.chaos),
                seed: self.dither.seed.or(base.dither.seed),
            },
            display: DisplayConfig {
                output: self.display.output.or(base.display.output),
                block_size: self.display.block_size.or(base.display.block_size),
                max_fps: self.display.max_fps.or(base.display.max_fps),
                width: self.display.width.or(base.display.width),
                height: self.display.height.or(base.display.height),
                profile: self.display.profile.or(base.display.profile),
            },
        }
    }
}

/// Fully resolved, range-checked settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub image: PathBuf,
    pub algorithm: Algorithm,
    pub threshold: u8,
    pub chaos: u8,
    pub seed: u32,
    pub output: Output,
    pub block_size: usize,
    pub max_fps: u32,
    pub width: usize,
    pub height: usize,
    pub profile: bool,
}

impl Settings {
    /// Apply defaults and clamp: threshold to 0-255, chaos to 0-100,
    /// block size and window dimensions to at least 1, fps to at least 0.
    pub fn clamped(config: &Config) -> Self {
        let d = &config.dither;
        let p = &config.display;
        Settings {
            image: config
                .image
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE)),
            algorithm: d.algorithm.unwrap_or_default(),
            threshold: d.threshold.unwrap_or(DEFAULT_THRESHOLD).clamp(0, 255) as u8,
            chaos: d.chaos.unwrap_or(DEFAULT_CHAOS).clamp(0, 100) as u8,
            seed: d.seed.unwrap_or(DEFAULT_SEED),
            output: p.output.unwrap_or_default(),
            block_size: p.block_size.unwrap_or(DEFAULT_BLOCK_SIZE).max(1) as usize,
            max_fps: p.max_fps.unwrap_or(DEFAULT_MAX_FPS).clamp(0, u32::MAX as i64) as u32,
            width: p.width.unwrap_or(DEFAULT_WIDTH).clamp(1, u32::MAX as i64) as usize,
            height: p.height.unwrap_or(DEFAULT_HEIGHT).clamp(1, u32::MAX as i64) as usize,
            profile: p.profile.unwrap_or(false),
        }
    }

    pub fn dither(&self) -> DitherSettings {
        DitherSettings {
            algorithm: self.algorithm,
            threshold: self.threshold,
            chaos: self.chaos,
            seed: self.seed,
        }
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            max_fps: self.max_fps,
            block_size: self.block_size,
            profile: self.profile,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings::clamped(&Config::default())
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("live-dither").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/live-dither/config.toml")
        })
}

/// Commented configuration written by `live-dither config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# live-dither configuration

# Background image (any format the image decoder understands)
image = "bg.jpg"

[dither]
# Animation: static, random, wave
algorithm = "wave"
# Cells darker than this (0-255) are forced to black
threshold = 40
# Noise mixed into the wave (0-100)
chaos = 10
# RNG seed for reproducible animation
seed = 12345

[display]
# Output: window, terminal
output = "window"
# Screen pixels per dither cell
block_size = 1
# Frame rate cap (0 = unlimited)
max_fps = 60
# Window size in pixels
width = 1280
height = 720
# Log the achieved frame rate every second
profile = false
"#;
