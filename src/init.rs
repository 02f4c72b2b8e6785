// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Engine configuration and bootstrap.
//!
//! The surrounding runtime builds one `SurfaceTable` / `SpriteEngine` pair
//! at start-up from an `EngineConfig`. Nothing is kept in globals, so a
//! test (or a second interpreter) simply builds its own pair.
//!
//! ```toml
//! max_surfaces = 128
//! stack_capacity = 64
//! max_layer = 7
//! log_level = "debug"
//! log_file = "sprite.log"
//! ```

use crate::{
    error::{Result, SpriteError},
    render::{sprite::MAX_LAYER, SpriteEngine, SurfaceTable},
    util::bitset::BITSET_BITS,
};
use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Slots in the surface table; capped at one per collision bit.
    pub max_surfaces: usize,
    /// Shown sprites allowed per layer class (layer 0, other layers).
    pub stack_capacity: usize,
    pub max_layer: u8,
    pub log_level: String,
    pub log_file: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_surfaces: BITSET_BITS,
            stack_capacity: BITSET_BITS,
            max_layer: MAX_LAYER,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl EngineConfig {
    /// Load config from a TOML file
    pub fn load(path: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(text: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let config: EngineConfig = toml::from_str(text)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_surfaces == 0 || self.max_surfaces > BITSET_BITS {
            return Err(SpriteError::IllegalQuantity(format!(
                "max_surfaces {}",
                self.max_surfaces
            )));
        }
        if self.max_layer > MAX_LAYER {
            return Err(SpriteError::IllegalQuantity(format!(
                "max_layer {}",
                self.max_layer
            )));
        }
        Ok(())
    }
}

/// Build a fresh surface table and sprite engine.
pub fn init_sprite_engine(config: &EngineConfig) -> Result<(SurfaceTable, SpriteEngine)> {
    config.validate()?;
    let table = SurfaceTable::new(config.max_surfaces);
    let engine = SpriteEngine::new(config.stack_capacity, config.max_layer)?;
    info!("surface table ready: {} slots", table.len());
    Ok((table, engine))
}
