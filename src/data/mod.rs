//! Terrain data
//!
//! The tile catalog and loading of tilesets and maps from JSON files.

pub mod catalog;
pub mod loader;

pub use catalog::TerrainCatalog;
pub use loader::{load_catalog, load_map, validate_map};
