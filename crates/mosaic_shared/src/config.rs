//! Startup configuration.
//!
//! Loaded once from TOML before the frame loop starts; nothing here is
//! touched in the per-frame path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Errors that can occur while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `EngineConfig`.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Initial viewport extent, used until the first resize event.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewportConfig {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0 }
    }
}

/// Engine-wide tunables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Per-frame exponential smoothing factor, `(0, 1)`.
    pub falloff: f32,
    /// Target frames per second for fake-vsync schedulers.
    pub target_fps: u32,
    /// Milliseconds of heartbeat silence before a peer is pruned.
    pub heartbeat_timeout_ms: u64,
    /// Initial viewport extent.
    pub viewport: ViewportConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            falloff: constants::FALLOFF,
            target_fps: constants::TARGET_FPS,
            heartbeat_timeout_ms: constants::HEARTBEAT_TIMEOUT_MS,
            viewport: ViewportConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a config file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or
    /// `ConfigError::Parse` on malformed contents.
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Frame budget implied by `target_fps`.
    #[must_use]
    pub fn frame_budget(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)))
    }
}
