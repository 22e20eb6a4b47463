//! Tile definitions
//!
//! Tileset entries and the tag rules that decide whether a tile blocks vision.

use serde::{Deserialize, Serialize};

/// Material tags the vision rules look at
pub mod tags {
    pub const IMPASSABLE: &str = "impassable";
    pub const WALL: &str = "wall";
    pub const BLOCKS_VISION: &str = "blocks_vision";

    pub const TRANSPARENT: &str = "transparent";
    pub const WINDOW: &str = "window";
    pub const ALLOWS_VISION: &str = "allows_vision";

    /// Tags that make a tile opaque
    pub const OPAQUE: [&str; 3] = [IMPASSABLE, WALL, BLOCKS_VISION];

    /// Tags that let vision through even when an opaque tag is present
    pub const SEE_THROUGH: [&str; 3] = [TRANSPARENT, WINDOW, ALLOWS_VISION];
}

/// A single tileset entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileDef {
    pub name: Option<String>,
    pub tags: Vec<String>,
    pub emits_light: bool,
    pub light_radius: Option<f64>,
    pub light_intensity: Option<f32>,
}

impl TileDef {
    pub fn new<S: Into<String>>(tags: impl IntoIterator<Item = S>) -> Self {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Make this tile a light source
    pub fn with_light(mut self, radius: f64, intensity: f32) -> Self {
        self.emits_light = true;
        self.light_radius = Some(radius);
        self.light_intensity = Some(intensity);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        has_any(&self.tags, &[tag])
    }

    pub fn vision_class(&self) -> VisionClass {
        VisionClass::of(&self.tags)
    }

    pub fn blocks_vision(&self) -> bool {
        self.vision_class().blocks()
    }
}

/// How a tag set behaves for sight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisionClass {
    /// No opaque tag
    Open,
    /// Opaque tag with a see-through override, e.g. a glass window set in a wall
    SeeThrough,
    Opaque,
}

impl VisionClass {
    /// Classify a tag set. Always recomputed from the tags, never cached.
    pub fn of<S: AsRef<str>>(tag_set: &[S]) -> Self {
        if !has_any(tag_set, &tags::OPAQUE) {
            VisionClass::Open
        } else if has_any(tag_set, &tags::SEE_THROUGH) {
            VisionClass::SeeThrough
        } else {
            VisionClass::Opaque
        }
    }

    pub fn blocks(self) -> bool {
        self == VisionClass::Opaque
    }
}

/// `opaque && !see_through` over a raw tag set
pub fn tags_block_vision<S: AsRef<str>>(tag_set: &[S]) -> bool {
    VisionClass::of(tag_set).blocks()
}

fn has_any<S: AsRef<str>>(tag_set: &[S], wanted: &[&str]) -> bool {
    tag_set
        .iter()
        .any(|t| wanted.iter().any(|w| *w == t.as_ref()))
}
