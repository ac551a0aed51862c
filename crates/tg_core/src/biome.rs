use serde::{Deserialize, Serialize};

/// Temperatures strictly below this are tundra.
pub const TUNDRA_MAX_TEMPERATURE: f64 = -0.05;
/// Moisture strictly below this is desert.
pub const DESERT_MAX_MOISTURE: f64 = -0.1;
/// Moisture strictly below this (and not desert) is grassland.
pub const GRASSLAND_MAX_MOISTURE: f64 = 0.1;

/// Biome assigned to a single map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Biome {
    #[default]
    Ocean,
    Tundra,
    Desert,
    Grassland,
    Forest,
}

impl Biome {
    /// Returns all biomes in classification priority order.
    pub fn all() -> &'static [Biome] {
        &[
            Self::Ocean,
            Self::Tundra,
            Self::Desert,
            Self::Grassland,
            Self::Forest,
        ]
    }

    /// Display name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ocean => "Ocean",
            Self::Tundra => "Tundra",
            Self::Desert => "Desert",
            Self::Grassland => "Grassland",
            Self::Forest => "Forest",
        }
    }

    /// Index for array access (0-4).
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn is_land(&self) -> bool {
        !matches!(self, Self::Ocean)
    }

    /// Determine the biome of a cell from its stored elevation and climate.
    ///
    /// The ocean test is non-strict (`elevation <= sea_level`), unlike the strict
    /// test the elevation builder uses when masking ocean cells to `0.0`. A cell
    /// sitting exactly on sea level is stored as land but classified as ocean.
    ///
    /// # Arguments
    /// * `elevation` - Stored elevation of the cell
    /// * `sea_level` - Ocean threshold used for the generation
    /// * `temperature` - Raw temperature noise, roughly [-1.0, 1.0]
    /// * `moisture` - Raw moisture noise, roughly [-1.0, 1.0]
    pub fn classify(elevation: f64, sea_level: f64, temperature: f64, moisture: f64) -> Self {
        if elevation <= sea_level {
            Self::Ocean
        } else if temperature < TUNDRA_MAX_TEMPERATURE {
            Self::Tundra
        } else if moisture < DESERT_MAX_MOISTURE {
            Self::Desert
        } else if moisture < GRASSLAND_MAX_MOISTURE {
            Self::Grassland
        } else {
            // NaN climate values also land here
            Self::Forest
        }
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
