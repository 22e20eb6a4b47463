//! Error types for loading and validating vision data

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse config: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("unknown tile '{id}' at ({x}, {y}, {z})")]
    UnknownTile { id: String, x: i32, y: i32, z: i32 },

    #[error("level {z} is {found:?} but the map is {expected:?} (width, height)")]
    LevelSize {
        z: i32,
        expected: (i32, i32),
        found: (i32, i32),
    },
}

pub type Result<T> = std::result::Result<T, VisionError>;
