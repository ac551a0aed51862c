use bevy::prelude::*;
use std::sync::{Arc, PoisonError, RwLock};
use tg_core::{CellCoord, TerrainError, TerrainResult};

use crate::terrain_map::{CellSample, TerrainMap};

/// Holds the most recently generated terrain map and serves point queries.
///
/// There is exactly one slot. Each `store` replaces the whole map at once, so a
/// query either sees the previous map or the new one, never a mix. Storing a
/// new map silently invalidates whatever map earlier queries were reading.
///
/// Cloning the resource clones the handle: all clones share the same slot.
#[derive(Resource, Clone, Default)]
pub struct MapCache {
    slot: Arc<RwLock<Option<Arc<TerrainMap>>>>,
}

impl MapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached map, returning a handle to the stored snapshot.
    pub fn store(&self, map: TerrainMap) -> Arc<TerrainMap> {
        let map = Arc::new(map);
        self.store_shared(map.clone());
        map
    }

    /// Replace the cached map with an already shared snapshot.
    pub fn store_shared(&self, map: Arc<TerrainMap>) {
        info!(
            "Caching {}x{} terrain map (sea level {})",
            map.width(),
            map.height(),
            map.sea_level()
        );
        // The slot only ever holds complete snapshots, so a poisoned lock is
        // still consistent.
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(map);
    }

    /// The currently cached map, if any.
    pub fn snapshot(&self) -> Option<Arc<TerrainMap>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_none()
    }

    /// Drop the cached map.
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Read all four values at `(x, y)` from the cached map.
    ///
    /// Fails with `NoMapGenerated` before the first store and with
    /// `OutOfBounds` for coordinates outside the cached map. Coordinates are
    /// never wrapped or clamped.
    pub fn query(&self, x: i64, y: i64) -> TerrainResult<CellSample> {
        let map = self.snapshot().ok_or(TerrainError::NoMapGenerated)?;
        let out_of_bounds = || TerrainError::OutOfBounds {
            x,
            y,
            width: map.width(),
            height: map.height(),
        };
        let coord = CellCoord::from_signed(x, y).ok_or_else(out_of_bounds)?;
        map.sample(coord.x, coord.y).ok_or_else(out_of_bounds)
    }
}
