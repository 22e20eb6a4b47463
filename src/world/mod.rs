//! World module
//!
//! Map data structures, tiles, and the visibility algorithms that run on them.

pub mod position;
pub mod map;
pub mod tile;
pub mod terrain;
pub mod fov;
pub mod los;
pub mod fog;
pub mod light;
pub mod shared;

pub use position::GridPos;
pub use map::{Layer, Level, MapData};
pub use tile::{TileDef, VisionClass};
pub use terrain::TerrainView;
pub use fov::{compute_fov, try_compute_fov, visible_tiles, Shadowcaster};
pub use los::{has_line_of_sight_3d, line_2d, line_3d, trace_sightline, try_trace_sightline};
pub use fog::{FogOfWar, FogState};
pub use light::{collect_light_sources, is_tile_illuminated, LightSource};
pub use shared::SharedMap;
