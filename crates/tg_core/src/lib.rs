use bevy::prelude::*;

pub mod biome;
pub mod config;
pub mod coords;
pub mod error;
pub mod grid;
pub mod noise;

pub use biome::Biome;
pub use config::{CoastlinePolicy, GenerationConfig, NoiseParams, DEFAULT_SEA_LEVEL};
pub use coords::CellCoord;
pub use error::{TerrainError, TerrainResult};
pub use grid::{BiomeGrid, ElevationGrid, Grid, MoistureGrid, TemperatureGrid};
pub use noise::NoiseField;

/// Core plugin providing foundational types for Terragen.
/// Registers the default generation config as a resource.
pub struct TgCorePlugin;

impl Plugin for TgCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GenerationConfig>();
    }
}
