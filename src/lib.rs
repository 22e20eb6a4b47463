//! Tilesight - visibility and line of sight for multi-level tile maps
//!
//! Symmetric shadowcasting field of view per level, and a 3D sightline
//! check between any two voxels, both driven by tile material tags.

pub mod config;
pub mod data;
pub mod error;
pub mod world;

// Re-export commonly used types
pub use config::{OutOfBounds, VisionConfig};
pub use data::TerrainCatalog;
pub use error::VisionError;
pub use world::{compute_fov, has_line_of_sight_3d, GridPos, MapData, TerrainView};
