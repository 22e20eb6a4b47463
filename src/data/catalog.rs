//! Terrain catalog
//!
//! Maps tile ids to their tileset definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::world::TileDef;

/// All known tile definitions, keyed by tile id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainCatalog {
    pub tiles: HashMap<String, TileDef>,
}

impl TerrainCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition
    pub fn insert(&mut self, id: impl Into<String>, def: TileDef) {
        self.tiles.insert(id.into(), def);
    }

    pub fn with(mut self, id: impl Into<String>, def: TileDef) -> Self {
        self.insert(id, def);
        self
    }

    pub fn get(&self, id: &str) -> Option<&TileDef> {
        self.tiles.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TileDef> {
        self.tiles.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tiles.contains_key(id)
    }

    /// Tags of a tile, empty when the id is unknown
    pub fn tags_of(&self, id: &str) -> &[String] {
        self.get(id).map(|def| def.tags.as_slice()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
