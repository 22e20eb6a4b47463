//! JSON data loader
//!
//! Loads tilesets and maps exported by the map editor. Loading is lenient:
//! unknown tile ids simply read as open space. [`validate_map`] reports them.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::catalog::TerrainCatalog;
use crate::error::{Result, VisionError};
use crate::world::map::Layer;
use crate::world::MapData;

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| VisionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| VisionError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a tileset file (`id -> { tags, ... }`)
pub fn load_catalog(path: &Path) -> Result<TerrainCatalog> {
    let catalog: TerrainCatalog = load_json(path)?;
    log::debug!("Loaded {} tile definitions from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a map file
pub fn load_map(path: &Path) -> Result<MapData> {
    let map: MapData = load_json(path)?;
    log::debug!(
        "Loaded map '{}' ({}x{}, {} levels) from {}",
        map.id,
        map.width(),
        map.height(),
        map.levels.len(),
        path.display()
    );
    Ok(map)
}

/// Check that every level matches the map size and every tile id is known
pub fn validate_map(catalog: &TerrainCatalog, map: &MapData) -> Result<()> {
    let expected = (map.width(), map.height());
    for (&z, level) in &map.levels {
        for layer in [Layer::Bottom, Layer::Middle] {
            let grid = level.layer(layer);
            // an absent layer is fine, a partial one is not
            if grid.is_empty() {
                continue;
            }
            let height = grid.len() as i32;
            if let Some(row) = grid.iter().find(|row| row.len() as i32 != expected.0) {
                return Err(VisionError::LevelSize {
                    z,
                    expected,
                    found: (row.len() as i32, height),
                });
            }
            if height != expected.1 {
                return Err(VisionError::LevelSize {
                    z,
                    expected,
                    found: (expected.0, height),
                });
            }
        }
    }

    if let Some((_, pos, id)) = map.tiles().find(|(_, _, id)| !catalog.contains(id)) {
        return Err(VisionError::UnknownTile {
            id: id.to_string(),
            x: pos.x,
            y: pos.y,
            z: pos.z,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{GridPos, TileDef};

    #[test]
    fn test_validate_unknown_tile() {
        let catalog = TerrainCatalog::new().with("wall", TileDef::new(["wall"]));
        let mut map = MapData::new("t", 4, 4);
        map.set_tile(Layer::Middle, GridPos::new(1, 1, 0), "wall");
        assert!(validate_map(&catalog, &map).is_ok());

        map.set_tile(Layer::Bottom, GridPos::new(2, 3, 0), "lava");
        match validate_map(&catalog, &map) {
            Err(VisionError::UnknownTile { id, x, y, z }) => {
                assert_eq!((id.as_str(), x, y, z), ("lava", 2, 3, 0));
            }
            other => panic!("expected unknown tile, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_level_size() {
        let catalog = TerrainCatalog::new();
        let mut map = MapData::new("t", 4, 4);
        map.level_mut(0).middle.pop();
        assert!(matches!(
            validate_map(&catalog, &map),
            Err(VisionError::LevelSize { z: 0, expected: (4, 4), found: (4, 3) })
        ));
    }

    #[test]
    fn test_missing_layer_is_valid() {
        let json = r#"{ "id": "m", "dimensions": { "width": 2, "height": 1 },
                        "levels": { "0": { "bottom": [["a", "a"]] } } }"#;
        let map: MapData = serde_json::from_str(json).unwrap();
        let catalog = TerrainCatalog::new().with("a", TileDef::default());
        assert!(validate_map(&catalog, &map).is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_map(Path::new("no/such/map.json")).unwrap_err();
        assert!(matches!(err, VisionError::Io { .. }));
        assert!(err.to_string().contains("no/such/map.json"));
    }
}
