//! Field of View calculation
//!
//! Symmetric shadowcasting over eight octants. Each octant is scanned row by
//! row from an explicit work queue of shadow intervals instead of recursing.

use std::collections::HashSet;
use std::convert::Infallible;

use super::terrain::TerrainView;
use super::GridPos;

/// Maps an octant's local `(depth, i)` onto a world offset:
/// `dx = depth * xx + i * xy`, `dy = depth * yx + i * yy`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Octant {
    pub xx: i32,
    pub xy: i32,
    pub yx: i32,
    pub yy: i32,
}

impl Octant {
    const fn new(xx: i32, xy: i32, yx: i32, yy: i32) -> Self {
        Self { xx, xy, yx, yy }
    }

    #[inline]
    pub fn transform(&self, depth: i32, i: i32) -> (i32, i32) {
        (depth * self.xx + i * self.xy, depth * self.yx + i * self.yy)
    }
}

/// The eight octant transforms. Every matrix is an axis permutation with
/// sign flips, so the local `depth² + i²` equals the world distance².
pub const OCTANTS: [Octant; 8] = [
    Octant::new(1, 0, 0, 1),
    Octant::new(0, 1, 1, 0),
    Octant::new(0, -1, 1, 0),
    Octant::new(-1, 0, 0, 1),
    Octant::new(-1, 0, 0, -1),
    Octant::new(0, -1, -1, 0),
    Octant::new(0, 1, -1, 0),
    Octant::new(1, 0, 0, -1),
];

/// A sector still to be scanned, starting at row `depth`
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShadowInterval {
    depth: i32,
    start_slope: f64,
    end_slope: f64,
}

/// Slope through the corner of cell `i` offset half a tile along the depth axis
#[inline]
fn slope(i: i32, depth: f64) -> f64 {
    (i as f64 + 0.5) / depth
}

/// Shadowcaster with a reusable work queue
#[derive(Debug, Default)]
pub struct Shadowcaster {
    queue: Vec<ShadowInterval>,
}

impl Shadowcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the field of view from an origin.
    ///
    /// The origin is marked first, then every octant is scanned. Tiles near
    /// the axes and diagonals belong to two octants and may be marked twice.
    pub fn compute<B, V>(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        radius: u32,
        mut is_blocking: B,
        mut mark_visible: V,
    ) where
        B: FnMut(i32, i32) -> bool,
        V: FnMut(i32, i32),
    {
        let result = self.try_compute::<Infallible, _, _>(
            origin_x,
            origin_y,
            radius,
            |x, y| Ok(is_blocking(x, y)),
            |x, y| {
                mark_visible(x, y);
                Ok(())
            },
        );
        match result {
            Ok(()) => {}
            Err(never) => match never {},
        }
    }

    /// Like [`Shadowcaster::compute`], but the callbacks may fail.
    /// The first error aborts the whole scan and is returned.
    pub fn try_compute<E, B, V>(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        radius: u32,
        mut is_blocking: B,
        mut mark_visible: V,
    ) -> Result<(), E>
    where
        B: FnMut(i32, i32) -> Result<bool, E>,
        V: FnMut(i32, i32) -> Result<(), E>,
    {
        mark_visible(origin_x, origin_y)?;
        if radius == 0 {
            return Ok(());
        }

        let radius = i32::try_from(radius).unwrap_or(i32::MAX);
        for octant in &OCTANTS {
            self.scan_octant(
                origin_x,
                origin_y,
                radius,
                octant,
                &mut is_blocking,
                &mut mark_visible,
            )?;
        }
        Ok(())
    }

    fn scan_octant<E, B, V>(
        &mut self,
        origin_x: i32,
        origin_y: i32,
        radius: i32,
        octant: &Octant,
        is_blocking: &mut B,
        mark_visible: &mut V,
    ) -> Result<(), E>
    where
        B: FnMut(i32, i32) -> Result<bool, E>,
        V: FnMut(i32, i32) -> Result<(), E>,
    {
        let radius_squared = radius as i64 * radius as i64;

        self.queue.clear();
        self.queue.push(ShadowInterval {
            depth: 1,
            start_slope: 1.0,
            end_slope: 0.0,
        });

        while let Some(ShadowInterval {
            depth,
            start_slope,
            end_slope,
        }) = self.queue.pop()
        {
            if depth > radius {
                continue;
            }

            let mut current_start_slope = start_slope;
            let mut prev_blocked = false;

            // +/-0.5 so a tile joins the sector once its centre crosses the slope line
            let range_start = ((start_slope * depth as f64 + 0.5).floor() as i32).min(depth);
            let range_end = ((end_slope * depth as f64 - 0.5).ceil() as i32).max(0);

            for i in (range_end..=range_start).rev() {
                let (dx, dy) = octant.transform(depth, i);
                let (map_x, map_y) = (origin_x + dx, origin_y + dy);

                let in_radius = (depth as i64).pow(2) + (i as i64).pow(2) < radius_squared;
                let blocked = if in_radius {
                    mark_visible(map_x, map_y)?;
                    is_blocking(map_x, map_y)?
                } else {
                    false
                };

                if blocked {
                    if !prev_blocked {
                        self.queue.push(ShadowInterval {
                            depth: depth + 1,
                            start_slope: current_start_slope,
                            end_slope: slope(i, depth as f64 - 0.5),
                        });
                    }
                } else if prev_blocked {
                    current_start_slope = slope(i, depth as f64 + 0.5);
                }
                prev_blocked = blocked;
            }

            if !prev_blocked {
                self.queue.push(ShadowInterval {
                    depth: depth + 1,
                    start_slope: current_start_slope,
                    end_slope,
                });
            }
        }
        Ok(())
    }
}

/// Compute field of view with a throwaway [`Shadowcaster`]
pub fn compute_fov<B, V>(origin_x: i32, origin_y: i32, radius: u32, is_blocking: B, mark_visible: V)
where
    B: FnMut(i32, i32) -> bool,
    V: FnMut(i32, i32),
{
    Shadowcaster::new().compute(origin_x, origin_y, radius, is_blocking, mark_visible);
}

/// Fallible [`compute_fov`]
pub fn try_compute_fov<E, B, V>(
    origin_x: i32,
    origin_y: i32,
    radius: u32,
    is_blocking: B,
    mark_visible: V,
) -> Result<(), E>
where
    B: FnMut(i32, i32) -> Result<bool, E>,
    V: FnMut(i32, i32) -> Result<(), E>,
{
    Shadowcaster::new().try_compute(origin_x, origin_y, radius, is_blocking, mark_visible)
}

/// Planar tiles visible from `origin` on its own level
pub fn visible_tiles(terrain: &TerrainView<'_>, origin: GridPos, radius: u32) -> HashSet<(i32, i32)> {
    let mut visible = HashSet::new();
    compute_fov(
        origin.x,
        origin.y,
        radius,
        |x, y| terrain.blocks_vision_2d(x, y, origin.z),
        |x, y| {
            visible.insert((x, y));
        },
    );
    visible
}
