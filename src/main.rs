//! Tilesight - Entry Point
//!
//! Loads a tileset and a map, runs the shadowcaster for one observer and
//! prints the level with what that observer can see.

use std::collections::HashSet;
use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use tilesight::data::{load_catalog, load_map, validate_map};
use tilesight::world::{visible_tiles, GridPos, TerrainView};
use tilesight::VisionConfig;

const USAGE: &str = "usage: tilesight <tileset.json> <map.json> <x> <y> <z> [radius]";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 5 {
        bail!(USAGE);
    }

    let config = VisionConfig::load_or_default();
    let tileset_path = PathBuf::from(&args[0]);
    let map_path = PathBuf::from(&args[1]);
    let coord = |i: usize| -> Result<i32> {
        args[i]
            .parse()
            .with_context(|| format!("invalid coordinate '{}'", args[i]))
    };
    let origin = GridPos::new(coord(2)?, coord(3)?, coord(4)?);
    let radius = match args.get(5) {
        Some(r) => r.parse().with_context(|| format!("invalid radius '{}'", r))?,
        None => config.player_vision_radius,
    };

    let catalog = load_catalog(&tileset_path)?;
    let map = load_map(&map_path)?;
    if let Err(e) = validate_map(&catalog, &map) {
        log::warn!("Map '{}' failed validation: {}", map.id, e);
    }

    let terrain = TerrainView::new(&catalog, &map).with_out_of_bounds(config.out_of_bounds);
    let visible = visible_tiles(&terrain, origin, radius);
    log::info!(
        "{} tiles visible from {:?} with radius {}",
        visible.len(),
        origin,
        radius
    );

    print!("{}", render_level(&terrain, origin, &visible));
    println!("visible: {}", visible.len());
    Ok(())
}

/// Text dump of one level
fn render_level(terrain: &TerrainView<'_>, origin: GridPos, visible: &HashSet<(i32, i32)>) -> String {
    let mut out = String::new();
    for y in 0..terrain.map.height() {
        for x in 0..terrain.map.width() {
            let ch = if (x, y) == (origin.x, origin.y) {
                '@'
            } else if !visible.contains(&(x, y)) {
                ' '
            } else if terrain.blocks_vision_2d(x, y, origin.z) {
                '#'
            } else {
                '.'
            };
            out.push(ch);
        }
        out.push('\n');
    }
    out
}
