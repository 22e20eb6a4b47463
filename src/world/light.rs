//! Light source exposure
//!
//! Finds the light emitting tiles of a map and checks whether a tile is
//! reached by a light. Colour and falloff are left to the renderer.

use super::los::line_2d;
use super::map::MapData;
use super::GridPos;
use crate::data::TerrainCatalog;

/// A light emitting tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSource {
    pub pos: GridPos,
    pub radius: f64,
    pub intensity: f32,
}

impl LightSource {
    pub fn new(pos: GridPos, radius: f64) -> Self {
        Self {
            pos,
            radius,
            intensity: 1.0,
        }
    }
}

/// Collect every tile whose definition emits light with a positive radius
pub fn collect_light_sources(catalog: &TerrainCatalog, map: &MapData) -> Vec<LightSource> {
    map.tiles()
        .filter_map(|(_, pos, id)| {
            let def = catalog.get(id)?;
            let radius = def.light_radius.filter(|r| *r > 0.0)?;
            def.emits_light.then(|| LightSource {
                pos,
                radius,
                intensity: def.light_intensity.unwrap_or(1.0),
            })
        })
        .collect()
}

/// Whether planar tile `(x, y)` on the light's level is lit by `light`.
///
/// Out of range tiles are dark and the light's own tile is lit. Otherwise
/// the tile is lit unless a tile strictly between it and the light blocks.
pub fn is_tile_illuminated<B>(x: i32, y: i32, light: &LightSource, mut is_blocking: B) -> bool
where
    B: FnMut(i32, i32) -> bool,
{
    let target = GridPos::new(x, y, light.pos.z);
    let distance = (light.pos.planar_distance_squared(&target) as f64).sqrt();
    if distance > light.radius {
        return false;
    }
    if (x, y) == (light.pos.x, light.pos.y) {
        return true;
    }

    let line = line_2d(light.pos.x, light.pos.y, x, y);
    let between = &line[1..line.len() - 1];
    !between.iter().any(|&(lx, ly)| is_blocking(lx, ly))
}
