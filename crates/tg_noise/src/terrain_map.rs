use bevy::log::debug;
use serde::{Deserialize, Serialize};
use tg_core::{
    Biome, BiomeGrid, ElevationGrid, GenerationConfig, Grid, MoistureGrid, NoiseField,
    TemperatureGrid, TerrainResult,
};

use crate::climate::ClimateBuilder;
use crate::elevation::ElevationBuilder;
use crate::field::PerlinField;
use crate::progress::{GenerationProgress, Phase};

/// The four values stored for one map cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSample {
    pub elevation: f64,
    pub temperature: f64,
    pub moisture: f64,
    pub biome: Biome,
}

/// A complete generated map: elevation, climate and biome grids of identical
/// dimensions, plus the config that produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainMap {
    config: GenerationConfig,
    elevation: ElevationGrid,
    temperature: TemperatureGrid,
    moisture: MoistureGrid,
    biomes: BiomeGrid,
}

impl TerrainMap {
    /// Generate a terrain map using parallel processing.
    pub fn generate(config: &GenerationConfig) -> TerrainResult<Self> {
        config.validate()?;
        let progress = GenerationProgress::new(config.height);
        Self::generate_with_progress(config, &progress)
    }

    /// Generate a terrain map, reporting progress as rows finish.
    pub fn generate_with_progress(
        config: &GenerationConfig,
        progress: &GenerationProgress,
    ) -> TerrainResult<Self> {
        let field = PerlinField::new();
        Self::generate_with_field(config, &field, progress)
    }

    /// Generate a terrain map from an arbitrary noise field.
    ///
    /// # Arguments
    /// * `config` - Map dimensions, sea level and noise parameters
    /// * `field` - Noise source sampled for every layer
    /// * `progress` - Shared progress tracker, sized for `config.height` rows
    pub fn generate_with_field(
        config: &GenerationConfig,
        field: &dyn NoiseField,
        progress: &GenerationProgress,
    ) -> TerrainResult<Self> {
        config.validate()?;

        let width = config.width;
        let height = config.height;
        let elevation_builder = ElevationBuilder::new(field, config);
        let climate_builder = ClimateBuilder::new(field, config);

        // Phase 1: per-cell noise layers, no cross-cell dependencies
        let cells = Grid::par_from_fn(width, height, |x, y| {
            let elevation = elevation_builder.elevation(x, y);
            let temperature = climate_builder.temperature(x, y);
            let moisture = climate_builder.moisture(x, y);

            // A row is evaluated left to right inside one task
            if x + 1 == width {
                progress.finish_rows(Phase::Sampling, 1);
            }

            (elevation, temperature, moisture)
        });

        let elevation = cells.map(|c| c.0);
        let temperature = cells.map(|c| c.1);
        let moisture = cells.map(|c| c.2);

        // Phase 2: classification needs all three layers complete
        let sea_level = config.sea_level;
        let biomes = cells.map(|&(e, t, m)| Biome::classify(e, sea_level, t, m));
        progress.finish_rows(Phase::Classification, height);

        let map = Self {
            config: config.clone(),
            elevation,
            temperature,
            moisture,
            biomes,
        };

        debug!(
            "Generated {}x{} terrain map (sea level {}, {} coastline): {:.1}% land",
            width,
            height,
            sea_level,
            config.coastline_policy.name(),
            map.land_fraction() * 100.0
        );

        Ok(map)
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.elevation.width()
    }

    pub fn height(&self) -> usize {
        self.elevation.height()
    }

    pub fn sea_level(&self) -> f64 {
        self.config.sea_level
    }

    pub fn elevation(&self) -> &ElevationGrid {
        &self.elevation
    }

    pub fn temperature(&self) -> &TemperatureGrid {
        &self.temperature
    }

    pub fn moisture(&self) -> &MoistureGrid {
        &self.moisture
    }

    pub fn biomes(&self) -> &BiomeGrid {
        &self.biomes
    }

    /// Split into `(elevation, temperature, moisture, biomes)`.
    pub fn into_parts(self) -> (ElevationGrid, TemperatureGrid, MoistureGrid, BiomeGrid) {
        (self.elevation, self.temperature, self.moisture, self.biomes)
    }

    /// Get all four values at specific coordinates.
    pub fn sample(&self, x: usize, y: usize) -> Option<CellSample> {
        Some(CellSample {
            elevation: *self.elevation.get(x, y)?,
            temperature: *self.temperature.get(x, y)?,
            moisture: *self.moisture.get(x, y)?,
            biome: *self.biomes.get(x, y)?,
        })
    }

    /// Get biome at specific coordinates.
    pub fn get_biome(&self, x: usize, y: usize) -> Option<Biome> {
        self.biomes.get(x, y).copied()
    }

    /// Get stored elevation at specific coordinates.
    pub fn get_elevation(&self, x: usize, y: usize) -> Option<f64> {
        self.elevation.get(x, y).copied()
    }

    /// Get temperature at specific coordinates.
    pub fn get_temperature(&self, x: usize, y: usize) -> Option<f64> {
        self.temperature.get(x, y).copied()
    }

    /// Get moisture at specific coordinates.
    pub fn get_moisture(&self, x: usize, y: usize) -> Option<f64> {
        self.moisture.get(x, y).copied()
    }

    /// Number of cells per biome, indexed by `Biome::index`.
    pub fn biome_histogram(&self) -> [usize; 5] {
        let mut counts = [0; 5];
        for biome in self.biomes.iter() {
            counts[biome.index()] += 1;
        }
        counts
    }

    /// Fraction of cells that are not ocean.
    pub fn land_fraction(&self) -> f64 {
        if self.biomes.is_empty() {
            return 0.0;
        }
        let land = self.biomes.iter().filter(|b| b.is_land()).count();
        land as f64 / self.biomes.len() as f64
    }

    /// Lowest and highest stored elevation.
    pub fn elevation_range(&self) -> (f64, f64) {
        self.elevation
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
                (lo.min(e), hi.max(e))
            })
    }
}
