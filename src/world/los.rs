//! Line of sight
//!
//! Discrete lines through the grid and the 3D sightline check built on them.

use std::convert::Infallible;

use super::map::MapData;
use super::terrain::TerrainView;
use super::GridPos;
use crate::data::TerrainCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
    Z,
}

/// Dominant-axis 3D Bresenham walk.
///
/// Yields every voxel after `start` up to and including `end`, exactly one
/// step along the dominant axis per item.
#[derive(Debug, Clone)]
pub struct Line3d {
    pos: GridPos,
    end: GridPos,
    axis: Axis,
    delta: (i32, i32, i32),
    step: (i32, i32, i32),
    // error terms for the two minor axes, in (x, y, z) order skipping the dominant one
    err_a: i32,
    err_b: i32,
}

impl Line3d {
    pub fn new(start: GridPos, end: GridPos) -> Self {
        let delta = (
            (end.x - start.x).abs(),
            (end.y - start.y).abs(),
            (end.z - start.z).abs(),
        );
        let sign = |from: i32, to: i32| if to > from { 1 } else { -1 };
        let step = (
            sign(start.x, end.x),
            sign(start.y, end.y),
            sign(start.z, end.z),
        );
        let (dx, dy, dz) = delta;

        let (axis, err_a, err_b) = if dx >= dy && dx >= dz {
            (Axis::X, 2 * dy - dx, 2 * dz - dx)
        } else if dy >= dx && dy >= dz {
            (Axis::Y, 2 * dx - dy, 2 * dz - dy)
        } else {
            (Axis::Z, 2 * dx - dz, 2 * dy - dz)
        };

        Self {
            pos: start,
            end,
            axis,
            delta,
            step,
            err_a,
            err_b,
        }
    }

    /// Number of voxels still to be yielded
    pub fn remaining(&self) -> usize {
        let left = match self.axis {
            Axis::X => self.end.x - self.pos.x,
            Axis::Y => self.end.y - self.pos.y,
            Axis::Z => self.end.z - self.pos.z,
        };
        left.unsigned_abs() as usize
    }
}

impl Iterator for Line3d {
    type Item = GridPos;

    fn next(&mut self) -> Option<GridPos> {
        if self.remaining() == 0 {
            return None;
        }

        let (dx, dy, dz) = self.delta;
        let (sx, sy, sz) = self.step;
        let p = &mut self.pos;

        match self.axis {
            Axis::X => {
                p.x += sx;
                if self.err_a >= 0 {
                    p.y += sy;
                    self.err_a -= 2 * dx;
                }
                if self.err_b >= 0 {
                    p.z += sz;
                    self.err_b -= 2 * dx;
                }
                self.err_a += 2 * dy;
                self.err_b += 2 * dz;
            }
            Axis::Y => {
                p.y += sy;
                if self.err_a >= 0 {
                    p.x += sx;
                    self.err_a -= 2 * dy;
                }
                if self.err_b >= 0 {
                    p.z += sz;
                    self.err_b -= 2 * dy;
                }
                self.err_a += 2 * dx;
                self.err_b += 2 * dz;
            }
            Axis::Z => {
                p.z += sz;
                if self.err_a >= 0 {
                    p.x += sx;
                    self.err_a -= 2 * dz;
                }
                if self.err_b >= 0 {
                    p.y += sy;
                    self.err_b -= 2 * dz;
                }
                self.err_a += 2 * dx;
                self.err_b += 2 * dy;
            }
        }
        Some(*p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Line3d {}

/// All voxels from `start` to `end`, both included, in walking order
pub fn line_3d(start: GridPos, end: GridPos) -> Vec<GridPos> {
    std::iter::once(start).chain(Line3d::new(start, end)).collect()
}

/// 2D Bresenham line from `(x0, y0)` to `(x1, y1)`, both included
pub fn line_2d(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let (mut x, mut y) = (x0, y0);

    let mut points = Vec::with_capacity(dx.max(dy) as usize + 1);
    loop {
        points.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// Check for an unobstructed sightline between two voxels.
///
/// Only voxels strictly between the endpoints are tested. The walk always
/// runs from the smaller endpoint to the larger one, so swapping `start`
/// and `end` visits the same voxels and gives the same answer.
pub fn trace_sightline<B>(start: GridPos, end: GridPos, mut is_blocking: B) -> bool
where
    B: FnMut(GridPos) -> bool,
{
    match try_trace_sightline::<Infallible, _>(start, end, |pos| Ok(is_blocking(pos))) {
        Ok(clear) => clear,
        Err(never) => match never {},
    }
}

/// Fallible [`trace_sightline`]; the first predicate error is returned as is
pub fn try_trace_sightline<E, B>(start: GridPos, end: GridPos, mut is_blocking: B) -> Result<bool, E>
where
    B: FnMut(GridPos) -> Result<bool, E>,
{
    let (from, to) = if start <= end { (start, end) } else { (end, start) };

    for pos in Line3d::new(from, to) {
        if pos == to {
            break;
        }
        if is_blocking(pos)? {
            log::trace!("Sightline {:?} -> {:?} blocked at {:?}", start, end, pos);
            return Ok(false);
        }
    }
    Ok(true)
}

/// Sightline check against map data: a voxel blocks when its middle layer is
/// opaque, or its bottom layer is tagged `blocks_vision`. Levels without data
/// and off-map coordinates are open space.
pub fn has_line_of_sight_3d(
    start: GridPos,
    end: GridPos,
    catalog: &TerrainCatalog,
    map: &MapData,
) -> bool {
    has_line_of_sight_in(&TerrainView::new(catalog, map), start, end)
}

/// [`has_line_of_sight_3d`] through a configured [`TerrainView`]
pub fn has_line_of_sight_in(terrain: &TerrainView<'_>, start: GridPos, end: GridPos) -> bool {
    trace_sightline(start, end, |pos| terrain.blocks_vision_3d(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::map::Layer;
    use crate::world::TileDef;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn p(x: i32, y: i32, z: i32) -> GridPos {
        GridPos::new(x, y, z)
    }

    fn random_pos(rng: &mut StdRng) -> GridPos {
        p(rng.gen_range(-6..=6), rng.gen_range(-6..=6), rng.gen_range(-6..=6))
    }

    #[test]
    fn test_line_3d_straight() {
        assert_eq!(
            line_3d(p(0, 0, 0), p(3, 0, 0)),
            vec![p(0, 0, 0), p(1, 0, 0), p(2, 0, 0), p(3, 0, 0)]
        );
        assert_eq!(line_3d(p(0, 0, 0), p(0, 0, -2)), vec![p(0, 0, 0), p(0, 0, -1), p(0, 0, -2)]);
        assert_eq!(line_3d(p(2, 2, 2), p(2, 2, 2)), vec![p(2, 2, 2)]);
    }

    #[test]
    fn test_line_3d_diagonal_steps() {
        assert_eq!(line_3d(p(0, 0, 0), p(2, 2, 2)), vec![p(0, 0, 0), p(1, 1, 1), p(2, 2, 2)]);
        assert_eq!(
            line_3d(p(0, 0, 0), p(4, 2, 1)),
            vec![p(0, 0, 0), p(1, 1, 0), p(2, 1, 1), p(3, 2, 1), p(4, 2, 1)]
        );
    }

    #[test]
    fn test_one_voxel_per_dominant_step() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let (a, b) = (random_pos(&mut rng), random_pos(&mut rng));
            let line = line_3d(a, b);
            assert_eq!(line.len() as i32, a.chebyshev_distance(&b) + 1);
            assert_eq!(line.last(), Some(&b));
            for pair in line.windows(2) {
                assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1, "{:?} -> {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_line_2d() {
        assert_eq!(line_2d(0, 0, 3, 1), vec![(0, 0), (1, 0), (2, 1), (3, 1)]);
        assert_eq!(line_2d(2, 2, 2, -1), vec![(2, 2), (2, 1), (2, 0), (2, -1)]);
        assert_eq!(line_2d(5, 5, 5, 5), vec![(5, 5)]);
    }

    #[test]
    fn test_destination_is_not_tested() {
        let opaque = |pos: GridPos| pos == p(0, 0, 0) || pos == p(5, 0, 0);
        assert!(trace_sightline(p(0, 0, 0), p(5, 0, 0), opaque));
        assert!(trace_sightline(p(5, 0, 0), p(0, 0, 0), opaque));
    }

    #[test]
    fn test_blocker_between() {
        assert!(!trace_sightline(p(0, 0, 0), p(5, 0, 0), |pos| pos == p(3, 0, 0)));
        assert!(!trace_sightline(p(0, 0, 0), p(0, 0, 4), |pos| pos == p(0, 0, 1)));
    }

    #[test]
    fn test_adjacent_and_same_voxel() {
        let mut queried = Vec::new();
        assert!(trace_sightline(p(1, 1, 1), p(2, 2, 1), |pos| {
            queried.push(pos);
            true
        }));
        assert!(trace_sightline(p(1, 1, 1), p(1, 1, 1), |_| true));
        assert!(queried.is_empty());
    }

    #[test]
    fn test_stops_at_first_blocker() {
        let mut queried = 0;
        let clear = trace_sightline(p(0, 0, 0), p(9, 0, 0), |pos| {
            queried += 1;
            pos.x >= 2
        });
        assert!(!clear);
        assert_eq!(queried, 2);
    }

    #[test]
    fn test_sightline_symmetry() {
        let mut rng = StdRng::seed_from_u64(3);
        let walls: HashSet<GridPos> = (0..120).map(|_| random_pos(&mut rng)).collect();
        for _ in 0..1000 {
            let (a, b) = (random_pos(&mut rng), random_pos(&mut rng));
            let blocking = |pos: GridPos| walls.contains(&pos);
            assert_eq!(
                trace_sightline(a, b, blocking),
                trace_sightline(b, a, blocking),
                "{:?} <-> {:?}",
                a,
                b
            );
        }
    }

    #[test]
    fn test_predicate_error_propagates() {
        let result = try_trace_sightline(p(0, 0, 0), p(4, 0, 0), |pos| {
            if pos.x == 2 {
                Err("level unloaded")
            } else {
                Ok(false)
            }
        });
        assert_eq!(result, Err("level unloaded"));
    }

    #[test]
    fn test_map_sightline_layers() {
        let catalog = TerrainCatalog::new()
            .with("wall", TileDef::new(["wall"]))
            .with("window", TileDef::new(["wall", "window"]))
            .with("smoke", TileDef::new(["blocks_vision"]));
        let mut map = MapData::new("t", 10, 10);

        map.set_tile(Layer::Middle, p(2, 0, 0), "window");
        assert!(has_line_of_sight_3d(p(0, 0, 0), p(5, 0, 0), &catalog, &map));

        map.set_tile(Layer::Middle, p(3, 0, 0), "wall");
        assert!(!has_line_of_sight_3d(p(0, 0, 0), p(5, 0, 0), &catalog, &map));

        map.set_tile(Layer::Bottom, p(2, 3, 0), "smoke");
        assert!(!has_line_of_sight_3d(p(2, 0, 0), p(2, 6, 0), &catalog, &map));
        assert!(has_line_of_sight_3d(p(1, 0, 0), p(1, 6, 0), &catalog, &map));
    }

    #[test]
    fn test_map_sightline_through_missing_levels() {
        let catalog = TerrainCatalog::new().with("wall", TileDef::new(["wall"]));
        let mut map = MapData::new("t", 10, 10);
        map.set_tile(Layer::Middle, p(4, 4, 0), "wall");
        // z = 1..=3 have no data: open air above the ground floor
        assert!(has_line_of_sight_3d(p(4, 4, 0), p(4, 4, 4), &catalog, &map));
        assert!(!has_line_of_sight_3d(p(4, 2, 0), p(4, 6, 0), &catalog, &map));
    }
}
