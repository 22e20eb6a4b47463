//! Map data structure
//!
//! A multi-level tile map. Each level holds a `bottom` layer (floors, ground
//! cover) and a `middle` layer (walls, tall furniture), both indexed `[y][x]`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::GridPos;

/// Which planar layer of a level to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Bottom,
    Middle,
}

/// A placed tile. Maps store either a bare id or `{ "tileId": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TileCell {
    Id(String),
    Placed {
        #[serde(rename = "tileId")]
        tile_id: String,
    },
}

impl TileCell {
    /// Tile id, or `None` for an empty-string cell
    pub fn tile_id(&self) -> Option<&str> {
        let id = match self {
            TileCell::Id(id) => id,
            TileCell::Placed { tile_id } => tile_id,
        };
        (!id.is_empty()).then_some(id.as_str())
    }
}

type Grid = Vec<Vec<Option<TileCell>>>;

/// One Z-level of the map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub bottom: Grid,
    pub middle: Grid,
}

impl Level {
    /// Create an empty level
    pub fn new(width: i32, height: i32) -> Self {
        let row = vec![None; width.max(0) as usize];
        let grid = vec![row; height.max(0) as usize];
        Self {
            bottom: grid.clone(),
            middle: grid,
        }
    }

    pub fn layer(&self, layer: Layer) -> &Grid {
        match layer {
            Layer::Bottom => &self.bottom,
            Layer::Middle => &self.middle,
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut Grid {
        match layer {
            Layer::Bottom => &mut self.bottom,
            Layer::Middle => &mut self.middle,
        }
    }

    /// Tile id at a planar position, `None` when empty or outside the grid
    pub fn tile_id(&self, layer: Layer, x: i32, y: i32) -> Option<&str> {
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.layer(layer).get(y)?.get(x)?.as_ref()?.tile_id()
    }
}

/// Planar size shared by every level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

/// A multi-level map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MapData {
    pub id: String,
    pub name: Option<String>,
    pub dimensions: Dimensions,
    pub start_pos: GridPos,
    pub levels: BTreeMap<i32, Level>,
}

impl MapData {
    /// Create a map with a single empty level at z = 0
    pub fn new(id: impl Into<String>, width: i32, height: i32) -> Self {
        let mut levels = BTreeMap::new();
        levels.insert(0, Level::new(width, height));
        Self {
            id: id.into(),
            name: None,
            dimensions: Dimensions { width, height },
            start_pos: GridPos::default(),
            levels,
        }
    }

    pub fn width(&self) -> i32 {
        self.dimensions.width
    }

    pub fn height(&self) -> i32 {
        self.dimensions.height
    }

    /// Check if planar coordinates are within the map
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width() && y >= 0 && y < self.height()
    }

    pub fn level(&self, z: i32) -> Option<&Level> {
        self.levels.get(&z)
    }

    /// Get a level, creating an empty one if it doesn't exist yet
    pub fn level_mut(&mut self, z: i32) -> &mut Level {
        let (width, height) = (self.width(), self.height());
        self.levels
            .entry(z)
            .or_insert_with(|| Level::new(width, height))
    }

    /// Tile id at a position. Missing levels and out-of-map cells are empty.
    pub fn tile_id_at(&self, layer: Layer, x: i32, y: i32, z: i32) -> Option<&str> {
        self.level(z)?.tile_id(layer, x, y)
    }

    /// Place a tile. Ignored outside the planar bounds.
    pub fn set_tile(&mut self, layer: Layer, pos: GridPos, tile_id: impl Into<String>) {
        self.put(layer, pos, Some(TileCell::Id(tile_id.into())));
    }

    pub fn clear_tile(&mut self, layer: Layer, pos: GridPos) {
        self.put(layer, pos, None);
    }

    fn put(&mut self, layer: Layer, pos: GridPos, cell: Option<TileCell>) {
        if !self.in_bounds(pos.x, pos.y) {
            return;
        }
        let width = self.width() as usize;
        let grid = self.level_mut(pos.z).layer_mut(layer);
        let y = pos.y as usize;
        if grid.len() <= y {
            grid.resize(y + 1, Vec::new());
        }
        let row = &mut grid[y];
        if row.len() < width {
            row.resize(width, None);
        }
        row[pos.x as usize] = cell;
    }

    /// Every placed tile on every level: (layer, position, tile id)
    pub fn tiles(&self) -> impl Iterator<Item = (Layer, GridPos, &str)> + '_ {
        self.levels.iter().flat_map(|(&z, level)| {
            [Layer::Bottom, Layer::Middle].into_iter().flat_map(move |layer| {
                level.layer(layer).iter().enumerate().flat_map(move |(y, row)| {
                    row.iter().enumerate().filter_map(move |(x, cell)| {
                        let id = cell.as_ref()?.tile_id()?;
                        Some((layer, GridPos::new(x as i32, y as i32, z), id))
                    })
                })
            })
        })
    }
}
