use tg_core::{
    CellCoord, GenerationConfig, Grid, MoistureGrid, NoiseField, NoiseParams, TemperatureGrid,
};

/// Builds the temperature and moisture fields.
///
/// Climate is raw noise with no ocean masking; ocean cells carry values too,
/// the biome classifier simply never reads them.
pub struct ClimateBuilder<'a> {
    field: &'a dyn NoiseField,
    temperature_noise: NoiseParams,
    moisture_noise: NoiseParams,
}

impl<'a> ClimateBuilder<'a> {
    pub fn new(field: &'a dyn NoiseField, config: &GenerationConfig) -> Self {
        Self {
            field,
            temperature_noise: config.temperature_noise,
            moisture_noise: config.moisture_noise,
        }
    }

    pub fn temperature(&self, x: usize, y: usize) -> f64 {
        let (sx, sy) = CellCoord::new(x, y).sample_pos();
        self.field.sample(sx, sy, &self.temperature_noise)
    }

    pub fn moisture(&self, x: usize, y: usize) -> f64 {
        let (sx, sy) = CellCoord::new(x, y).sample_pos();
        self.field.sample(sx, sy, &self.moisture_noise)
    }

    /// Build both climate grids in parallel.
    pub fn build(&self, width: usize, height: usize) -> (TemperatureGrid, MoistureGrid) {
        rayon::join(
            || Grid::par_from_fn(width, height, |x, y| self.temperature(x, y)),
            || Grid::par_from_fn(width, height, |x, y| self.moisture(x, y)),
        )
    }
}
