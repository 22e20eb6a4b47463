//! Terrain view
//!
//! Joins a tile catalog with map data and answers the blocking questions the
//! shadowcaster and the sightline tracer ask. Nothing is cached: every query
//! reads the current tags, so a door that closed since the last call blocks.

use super::map::{Layer, MapData};
use super::tile::{tags, tags_block_vision};
use super::GridPos;
use crate::config::OutOfBounds;
use crate::data::TerrainCatalog;

/// Read-only view over a catalog and a map
#[derive(Debug, Clone, Copy)]
pub struct TerrainView<'a> {
    pub catalog: &'a TerrainCatalog,
    pub map: &'a MapData,
    pub out_of_bounds: OutOfBounds,
}

impl<'a> TerrainView<'a> {
    pub fn new(catalog: &'a TerrainCatalog, map: &'a MapData) -> Self {
        Self {
            catalog,
            map,
            out_of_bounds: OutOfBounds::Open,
        }
    }

    pub fn with_out_of_bounds(mut self, policy: OutOfBounds) -> Self {
        self.out_of_bounds = policy;
        self
    }

    /// Tags of the tile on `layer` at a position, empty when nothing is there
    pub fn tags_at(&self, layer: Layer, x: i32, y: i32, z: i32) -> &'a [String] {
        match self.map.tile_id_at(layer, x, y, z) {
            Some(id) => self.catalog.tags_of(id),
            None => &[],
        }
    }

    /// Blocking answer for off-map planar coordinates, `None` when on the map
    fn off_map(&self, x: i32, y: i32) -> Option<bool> {
        if self.map.in_bounds(x, y) {
            return None;
        }
        Some(self.out_of_bounds == OutOfBounds::Blocked)
    }

    /// Planar blocking test used by the shadowcaster: the middle layer at `z`
    pub fn blocks_vision_2d(&self, x: i32, y: i32, z: i32) -> bool {
        if let Some(blocked) = self.off_map(x, y) {
            return blocked;
        }
        tags_block_vision(self.tags_at(Layer::Middle, x, y, z))
    }

    /// Voxel blocking test used by the sightline tracer.
    ///
    /// The middle layer is checked first with the full opaque/see-through
    /// rule. Failing that, a bottom layer tile carrying an explicit
    /// `blocks_vision` tag (smoke pooled on the floor) still blocks. A level
    /// with no data is open space.
    pub fn blocks_vision_3d(&self, pos: GridPos) -> bool {
        if self.map.level(pos.z).is_none() {
            return false;
        }
        if let Some(blocked) = self.off_map(pos.x, pos.y) {
            return blocked;
        }
        if tags_block_vision(self.tags_at(Layer::Middle, pos.x, pos.y, pos.z)) {
            return true;
        }
        self.tags_at(Layer::Bottom, pos.x, pos.y, pos.z)
            .iter()
            .any(|t| t == tags::BLOCKS_VISION)
    }
}
