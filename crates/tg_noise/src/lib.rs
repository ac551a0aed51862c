use bevy::prelude::*;

pub mod cache;
pub mod climate;
pub mod elevation;
pub mod field;
pub mod progress;
pub mod terrain_map;

pub use cache::MapCache;
pub use climate::ClimateBuilder;
pub use elevation::{ElevationBuilder, ElevationSample};
pub use field::{PerlinField, NOISE_SEED};
pub use progress::{GenerationProgress, Phase};
pub use terrain_map::{CellSample, TerrainMap};

use tg_core::{GenerationConfig, TerrainResult};

/// Generate a terrain map from `config`. Pure computation; storing the result
/// in a [`MapCache`] is up to the caller.
pub fn generate(config: &GenerationConfig) -> TerrainResult<TerrainMap> {
    TerrainMap::generate(config)
}

/// Read one cell from the cached map.
pub fn query_point(cache: &MapCache, x: i64, y: i64) -> TerrainResult<CellSample> {
    cache.query(x, y)
}

/// Terrain generation plugin for Terragen.
/// Provides the shared single-slot map cache.
pub struct TgNoisePlugin;

impl Plugin for TgNoisePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapCache>();
    }
}
