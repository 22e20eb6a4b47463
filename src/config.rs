//! Vision configuration
//!
//! Loaded from a RON file, falling back to defaults.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisionError};

const CONFIG_FILE: &str = "vision.ron";

/// How map-backed predicates answer for planar coordinates outside the map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutOfBounds {
    /// Off-map tiles are open space
    #[default]
    Open,
    /// Off-map tiles block vision
    Blocked,
}

/// Tunables for observers and terrain lookups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub player_vision_radius: u32,
    pub npc_vision_radius: u32,
    pub out_of_bounds: OutOfBounds,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            player_vision_radius: 10,
            npc_vision_radius: 8,
            out_of_bounds: OutOfBounds::Open,
        }
    }
}

impl VisionConfig {
    /// Parse a config from RON text
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| VisionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Load `vision.ron` from the platform config directory, or use defaults
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!("Failed to load {}: {}. Using defaults.", path.display(), e);
            Self::default()
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tilesight").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}
