//! Top-level configuration file
//!
//! A JSON document with a `game` section (simulation) and a `render` section
//! (drawing only). Missing fields fall back to their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::game::GameConfig;
use crate::render::RenderConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub render: RenderConfig,
}

impl AppConfig {
    /// Read and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("Failed to parse config JSON")?;
        config.game.validate()?;
        Ok(config)
    }
}
