use tg_core::{
    CellCoord, CoastlinePolicy, ElevationGrid, GenerationConfig, Grid, NoiseField, NoiseParams,
};

/// Intermediate values computed for one cell's elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElevationSample {
    /// Primary elevation noise.
    pub raw: f64,
    /// Coast noise already multiplied by the coastline amplitude.
    pub coast: f64,
    /// Elevation after the coastline policy, used for the ocean test.
    pub working: f64,
    /// Value written to the elevation grid; exactly `0.0` for ocean.
    pub stored: f64,
}

/// Builds elevation values with sea-level masking and coastline blending.
pub struct ElevationBuilder<'a> {
    field: &'a dyn NoiseField,
    sea_level: f64,
    coastline_amplitude: f64,
    elevation_noise: NoiseParams,
    coast_noise: NoiseParams,
    policy: CoastlinePolicy,
}

impl<'a> ElevationBuilder<'a> {
    pub fn new(field: &'a dyn NoiseField, config: &GenerationConfig) -> Self {
        Self {
            field,
            sea_level: config.sea_level,
            coastline_amplitude: config.coastline_amplitude,
            elevation_noise: config.elevation_noise,
            coast_noise: config.coast_noise,
            policy: config.coastline_policy,
        }
    }

    /// Apply the coast band rule to a raw elevation.
    ///
    /// Elevations strictly inside `(sea_level - amplitude, sea_level + coast)`
    /// are shifted by `coast`. Outside the band the value is unchanged.
    pub fn blend(&self, elevation: f64, coast: f64) -> f64 {
        let lower = self.sea_level - self.coastline_amplitude;
        let upper = self.sea_level + coast;
        if lower < elevation && elevation < upper {
            elevation + coast
        } else {
            elevation
        }
    }

    /// Force ocean cells to `0.0`. The ocean test is strict, so a cell exactly
    /// at sea level keeps its elevation.
    pub fn mask(&self, elevation: f64) -> f64 {
        if elevation < self.sea_level {
            0.0
        } else {
            elevation
        }
    }

    /// Compute every intermediate value for the cell at `(x, y)`.
    pub fn sample(&self, x: usize, y: usize) -> ElevationSample {
        let (fx, fy) = CellCoord::new(x, y).sample_pos();

        let raw = self.field.sample(fx, fy, &self.elevation_noise);
        let coast = self.field.sample(fx, fy, &self.coast_noise) * self.coastline_amplitude;

        let working = match self.policy {
            CoastlinePolicy::Blended => self.blend(raw, coast),
            CoastlinePolicy::Unblended => raw,
        };

        ElevationSample {
            raw,
            coast,
            working,
            stored: self.mask(working),
        }
    }

    /// Stored elevation at `(x, y)`.
    pub fn elevation(&self, x: usize, y: usize) -> f64 {
        self.sample(x, y).stored
    }

    /// Build the full elevation grid in parallel.
    pub fn build(&self, width: usize, height: usize) -> ElevationGrid {
        Grid::par_from_fn(width, height, |x, y| self.elevation(x, y))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::field::PerlinField;

    /// Field returning fixed values, told apart by octave count.
    pub(crate) struct FixedField {
        pub elevation: f64,
        pub coast: f64,
        pub climate: f64,
    }

    impl FixedField {
        pub(crate) fn new(elevation: f64, coast: f64, climate: f64) -> Self {
            Self {
                elevation,
                coast,
                climate,
            }
        }
    }

    impl NoiseField for FixedField {
        fn sample(&self, _x: f64, _y: f64, params: &NoiseParams) -> f64 {
            match params.octaves {
                10 => self.elevation,
                1 => self.coast,
                _ => self.climate,
            }
        }
    }

    fn builder(field: &FixedField, policy: CoastlinePolicy) -> ElevationBuilder<'_> {
        let config = GenerationConfig::with_sea_level(0.15).with_policy(policy);
        ElevationBuilder::new(field, &config)
    }

    #[test]
    fn deep_ocean_is_zeroed() {
        let field = FixedField::new(-0.4, 0.5, 0.0);
        let sample = builder(&field, CoastlinePolicy::Blended).sample(3, 4);
        assert_eq!(sample.working, -0.4);
        assert_eq!(sample.stored, 0.0);
    }

    #[test]
    fn high_land_is_untouched() {
        let field = FixedField::new(0.6, 0.5, 0.0);
        let sample = builder(&field, CoastlinePolicy::Blended).sample(3, 4);
        assert_eq!(sample.stored, 0.6);
    }

    #[test]
    fn coast_band_is_blended() {
        // coast = 1.0 * 0.05, band is (0.10, 0.20)
        let field = FixedField::new(0.12, 1.0, 0.0);
        let b = builder(&field, CoastlinePolicy::Blended);
        let sample = b.sample(0, 0);
        assert!((sample.coast - 0.05).abs() < 1e-12);
        assert!((sample.working - 0.17).abs() < 1e-12);
        // Pushed above sea level: land
        assert!((sample.stored - 0.17).abs() < 1e-12);
    }

    #[test]
    fn negative_coast_noise_deepens_shallows() {
        // coast = -0.02, band is (0.10, 0.13); 0.11 becomes 0.09
        let field = FixedField::new(0.11, -0.4, 0.0);
        let sample = builder(&field, CoastlinePolicy::Blended).sample(0, 0);
        assert!((sample.working - 0.09).abs() < 1e-12);
        assert_eq!(sample.stored, 0.0);
    }

    #[test]
    fn band_bounds_are_exclusive() {
        let field = FixedField::new(0.0, 0.0, 0.0);
        let b = builder(&field, CoastlinePolicy::Blended);
        // Lower bound: 0.15 - 0.05
        let lower = 0.15 - 0.05;
        assert_eq!(b.blend(lower, 0.05), lower);
        // Upper bound: sea level + coast
        assert_eq!(b.blend(0.15 + 0.05, 0.05), 0.15 + 0.05);
    }

    #[test]
    fn unblended_policy_discards_coast_noise() {
        let field = FixedField::new(0.12, 1.0, 0.0);
        let sample = builder(&field, CoastlinePolicy::Unblended).sample(0, 0);
        assert!((sample.coast - 0.05).abs() < 1e-12);
        assert_eq!(sample.working, 0.12);
        assert_eq!(sample.stored, 0.0);
    }

    #[test]
    fn exactly_sea_level_stays_land() {
        let field = FixedField::new(0.15, -1.0, 0.0);
        let sample = builder(&field, CoastlinePolicy::Blended).sample(0, 0);
        assert_eq!(sample.stored, 0.15);
    }

    #[test]
    fn ocean_cells_store_exact_zero() {
        let field = PerlinField::new();
        let config = GenerationConfig::with_sea_level(0.15);
        let b = ElevationBuilder::new(&field, &config);
        for y in 0..40 {
            for x in 0..60 {
                let sample = b.sample(x * 5, y * 5);
                if sample.working < 0.15 {
                    assert_eq!(sample.stored.to_bits(), 0.0f64.to_bits());
                } else {
                    assert_eq!(sample.stored, sample.working);
                }
            }
        }
    }

    #[test]
    fn build_matches_per_cell_sampling() {
        let field = PerlinField::new();
        let config = GenerationConfig::with_sea_level(0.15);
        let b = ElevationBuilder::new(&field, &config);
        let grid = b.build(24, 12);
        assert_eq!(grid.dimensions(), (24, 12));
        for (coord, &value) in grid.indexed() {
            assert_eq!(value, b.elevation(coord.x, coord.y));
        }
    }
}
