use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::TerrainError;

pub const DEFAULT_WIDTH: usize = 600;
pub const DEFAULT_HEIGHT: usize = 400;
pub const DEFAULT_SEA_LEVEL: f64 = 0.15;
pub const DEFAULT_COASTLINE_AMPLITUDE: f64 = 0.05;

/// Lowest and highest accepted sea level. Ocean cells are stored as `0.0`,
/// so a sea level below zero would classify them as land.
pub const SEA_LEVEL_RANGE: (f64, f64) = (0.0, 1.0);

/// Fractal noise parameters for one sampled layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Coordinate divisor; larger values give larger features.
    pub scale: f64,
    pub octaves: u32,
    /// Amplitude falloff per octave.
    pub persistence: f64,
    /// Frequency growth per octave.
    pub lacunarity: f64,
}

impl NoiseParams {
    pub const DEFAULT_PERSISTENCE: f64 = 0.5;
    pub const DEFAULT_LACUNARITY: f64 = 2.0;

    pub const fn new(scale: f64, octaves: u32, persistence: f64, lacunarity: f64) -> Self {
        Self {
            scale,
            octaves,
            persistence,
            lacunarity,
        }
    }

    /// Params with default persistence and lacunarity.
    pub const fn with_scale(scale: f64, octaves: u32) -> Self {
        Self::new(
            scale,
            octaves,
            Self::DEFAULT_PERSISTENCE,
            Self::DEFAULT_LACUNARITY,
        )
    }

    /// Primary elevation noise: 10 octaves at scale 100.
    pub const fn elevation() -> Self {
        Self::with_scale(100.0, 10)
    }

    /// Secondary coastline noise: a single octave at scale 50.
    pub const fn coast() -> Self {
        Self::with_scale(50.0, 1)
    }

    pub const fn temperature() -> Self {
        Self::with_scale(100.0, 6)
    }

    pub const fn moisture() -> Self {
        Self::with_scale(150.0, 6)
    }

    fn validate(&self, layer: &str) -> Result<(), TerrainError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TerrainError::InvalidConfig(format!(
                "{layer} noise scale must be positive, got {}",
                self.scale
            )));
        }
        if self.octaves == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "{layer} noise needs at least one octave"
            )));
        }
        if !self.persistence.is_finite() || !self.lacunarity.is_finite() {
            return Err(TerrainError::InvalidConfig(format!(
                "{layer} noise persistence and lacunarity must be finite"
            )));
        }
        Ok(())
    }
}

/// How the coastline noise affects stored elevation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CoastlinePolicy {
    /// Cells inside the coast band are perturbed by the coast noise before the
    /// ocean test.
    #[default]
    Blended,
    /// The coast perturbation is computed but discarded; the raw elevation
    /// noise decides land and ocean.
    Unblended,
}

impl CoastlinePolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Blended => "blended",
            Self::Unblended => "unblended",
        }
    }
}

/// Everything needed to generate one terrain map.
///
/// Only `sea_level` is expected to vary per request; everything else has
/// fixed defaults that presets may override.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub width: usize,
    pub height: usize,
    pub sea_level: f64,
    /// Ruggedness of the coast; also the depth of the coast band below sea level.
    pub coastline_amplitude: f64,
    pub elevation_noise: NoiseParams,
    pub coast_noise: NoiseParams,
    pub temperature_noise: NoiseParams,
    pub moisture_noise: NoiseParams,
    pub coastline_policy: CoastlinePolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            sea_level: DEFAULT_SEA_LEVEL,
            coastline_amplitude: DEFAULT_COASTLINE_AMPLITUDE,
            elevation_noise: NoiseParams::elevation(),
            coast_noise: NoiseParams::coast(),
            temperature_noise: NoiseParams::temperature(),
            moisture_noise: NoiseParams::moisture(),
            coastline_policy: CoastlinePolicy::default(),
        }
    }
}

impl GenerationConfig {
    /// Default configuration with the given sea level.
    pub fn with_sea_level(sea_level: f64) -> Self {
        Self {
            sea_level,
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_policy(mut self, policy: CoastlinePolicy) -> Self {
        self.coastline_policy = policy;
        self
    }

    /// Reject configurations the generator cannot honour.
    pub fn validate(&self) -> Result<(), TerrainError> {
        if self.width == 0 || self.height == 0 {
            return Err(TerrainError::InvalidConfig(format!(
                "map dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(TerrainError::InvalidConfig(format!(
                "map dimensions {}x{} overflow",
                self.width, self.height
            )));
        }
        let (min, max) = SEA_LEVEL_RANGE;
        if !self.sea_level.is_finite() || self.sea_level < min || self.sea_level > max {
            return Err(TerrainError::InvalidConfig(format!(
                "sea level must be within [{min}, {max}], got {}",
                self.sea_level
            )));
        }
        if !self.coastline_amplitude.is_finite() || self.coastline_amplitude < 0.0 {
            return Err(TerrainError::InvalidConfig(format!(
                "coastline amplitude must be non-negative, got {}",
                self.coastline_amplitude
            )));
        }
        self.elevation_noise.validate("elevation")?;
        self.coast_noise.validate("coast")?;
        self.temperature_noise.validate("temperature")?;
        self.moisture_noise.validate("moisture")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_parameters() {
        let config = GenerationConfig::default();
        assert_eq!((config.width, config.height), (600, 400));
        assert_eq!(config.sea_level, 0.15);
        assert_eq!(config.coastline_amplitude, 0.05);
        assert_eq!(config.elevation_noise, NoiseParams::new(100.0, 10, 0.5, 2.0));
        assert_eq!(config.coast_noise, NoiseParams::new(50.0, 1, 0.5, 2.0));
        assert_eq!(config.temperature_noise, NoiseParams::new(100.0, 6, 0.5, 2.0));
        assert_eq!(config.moisture_noise, NoiseParams::new(150.0, 6, 0.5, 2.0));
        assert_eq!(config.coastline_policy, CoastlinePolicy::Blended);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let config = GenerationConfig::default().with_size(0, 400);
        assert!(matches!(
            config.validate(),
            Err(TerrainError::InvalidConfig(_))
        ));
        let config = GenerationConfig::default().with_size(600, 0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn sea_level_range_is_enforced() {
        assert!(GenerationConfig::with_sea_level(-0.1).validate().is_err());
        assert!(GenerationConfig::with_sea_level(1.5).validate().is_err());
        assert!(GenerationConfig::with_sea_level(f64::NAN).validate().is_err());
        assert!(GenerationConfig::with_sea_level(0.0).validate().is_ok());
        assert!(GenerationConfig::with_sea_level(1.0).validate().is_ok());
    }

    #[test]
    fn bad_noise_params_are_rejected() {
        let mut config = GenerationConfig::default();
        config.coast_noise.scale = 0.0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::default();
        config.temperature_noise.octaves = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::default();
        config.coastline_amplitude = -0.01;
        assert!(config.validate().is_err());
    }
}
