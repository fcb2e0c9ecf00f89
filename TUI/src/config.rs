//! Application configuration and constants.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::reveal::RevealTiming;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reveal.duration_ms must be greater than zero")]
    ZeroDuration,
    #[error("reveal.{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("reveal.{field} must be a finite number (got {value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("reveal.base_interval_ms must be greater than zero")]
    ZeroInterval,
    #[error("tick_rate_ms must be greater than zero")]
    ZeroTickRate,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Main loop tick rate in milliseconds (target 60 FPS = ~16ms)
    pub tick_rate_ms: u64,

    /// How many ticks to show status messages (180 = ~3s at 60fps)
    pub status_timeout_ticks: u64,

    /// Modulo for animation frame counter
    pub animation_frame_mod: usize,

    /// Timing curve of the number reveal
    pub reveal: RevealTiming,

    /// Fixed seed for reproducible draws and cards
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate_ms: 16,
            status_timeout_ticks: 180,
            animation_frame_mod: 360,
            reveal: RevealTiming::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Load from `path`, else from the per-user config file if one exists,
    /// else fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// `<config dir>/bingo-tui/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bingo-tui").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        let reveal = &self.reveal;
        if reveal.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        for (field, value) in [
            ("base_interval_ms", reveal.base_interval_ms),
            ("interval_span_ms", reveal.interval_span_ms),
            ("easing_exponent", reveal.easing_exponent),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        // Every decoy step must move the clock forward
        if reveal.base_interval_ms == 0.0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Entries of the home menu
pub const MENU: &[(&str, &str)] = &[
    ("Cartela", "Gerar uma cartela de bingo"),
    ("Sorteador", "Sortear números de 1 a 90"),
];
