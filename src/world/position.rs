//! Grid coordinates
//!
//! Integer positions on a multi-level tile map.

use serde::{Deserialize, Serialize};

/// Position on the map: `x`, `y` are planar, `z` selects the level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Same planar position on another level
    pub fn with_z(self, z: i32) -> Self {
        Self { z, ..self }
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }

    /// Squared planar distance, ignoring the level
    pub fn planar_distance_squared(&self, other: &GridPos) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Chebyshev distance over all three axes
    pub fn chebyshev_distance(&self, other: &GridPos) -> i32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl From<(i32, i32, i32)> for GridPos {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distances() {
        let a = GridPos::new(0, 0, 0);
        let b = GridPos::new(3, -4, 2);
        assert_eq!(a.planar_distance_squared(&b), 25);
        assert_eq!(a.chebyshev_distance(&b), 4);
        assert_eq!(b.chebyshev_distance(&a.with_z(-5)), 7);
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        assert!(GridPos::new(0, 9, 9) < GridPos::new(1, 0, 0));
        assert!(GridPos::new(1, 0, 2) < GridPos::new(1, 1, 0));
    }
}
