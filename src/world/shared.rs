//! Shared map access
//!
//! The vision functions never lock anything. Callers that edit terrain while
//! other threads compute visibility hold a read guard across all the FOV and
//! sightline calls that must agree with each other.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};

use super::map::MapData;

#[derive(Debug, Clone, Default)]
pub struct SharedMap {
    inner: Arc<RwLock<MapData>>,
}

impl SharedMap {
    pub fn new(map: MapData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    /// Consistent snapshot for as long as the guard lives
    pub fn read(&self) -> RwLockReadGuard<'_, MapData> {
        self.inner.read()
    }

    /// Apply a terrain edit, waiting for readers to finish
    pub fn edit<R>(&self, f: impl FnOnce(&mut MapData) -> R) -> R {
        f(&mut self.inner.write())
    }
}
