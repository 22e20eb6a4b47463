//! Fog of war
//!
//! Per-level exploration state, refreshed from the shadowcaster.

use std::collections::BTreeMap;

use super::fov::Shadowcaster;
use super::terrain::TerrainView;
use super::GridPos;

/// What the observer knows about a tile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FogState {
    #[default]
    Hidden,
    /// Seen before, not in view now
    Visited,
    Visible,
}

/// Fog of war grids, one per level that has been looked at
#[derive(Debug, Default)]
pub struct FogOfWar {
    width: i32,
    height: i32,
    levels: BTreeMap<i32, Vec<FogState>>,
    caster: Shadowcaster,
}

impl FogOfWar {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            ..Self::default()
        }
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// State of a tile. Tiles off the grid or on unseen levels are hidden.
    pub fn state_at(&self, x: i32, y: i32, z: i32) -> FogState {
        self.idx(x, y)
            .and_then(|i| self.levels.get(&z).map(|level| level[i]))
            .unwrap_or_default()
    }

    pub fn is_visible(&self, x: i32, y: i32, z: i32) -> bool {
        self.state_at(x, y, z) == FogState::Visible
    }

    /// Refresh the observer's level: what was visible becomes visited, then
    /// everything in view becomes visible. Other levels are left alone.
    pub fn update(&mut self, terrain: &TerrainView<'_>, origin: GridPos, radius: u32) {
        let (width, height) = (self.width, self.height);
        let cells = (width * height) as usize;
        let level = self
            .levels
            .entry(origin.z)
            .or_insert_with(|| vec![FogState::Hidden; cells]);

        for state in level.iter_mut() {
            if *state == FogState::Visible {
                *state = FogState::Visited;
            }
        }

        let mut visible = 0usize;
        self.caster.compute(
            origin.x,
            origin.y,
            radius,
            |x, y| terrain.blocks_vision_2d(x, y, origin.z),
            |x, y| {
                if x >= 0 && x < width && y >= 0 && y < height {
                    let cell = &mut level[(y * width + x) as usize];
                    if *cell != FogState::Visible {
                        *cell = FogState::Visible;
                        visible += 1;
                    }
                }
            },
        );

        log::debug!(
            "Fog refreshed at {:?} radius {}: {} tiles visible",
            origin,
            radius,
            visible
        );
    }

    /// Forget everything on one level
    pub fn reset_level(&mut self, z: i32) {
        self.levels.remove(&z);
    }
}
