use std::fs;
use std::path::Path;
use tg_core::{GenerationConfig, TerrainError};

/// Error type for preset I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum PresetIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),

    #[error("RON parse error: {0}")]
    RonSpanned(#[from] ron::error::SpannedError),

    /// The preset parsed but describes a config the generator rejects.
    #[error("invalid preset: {0}")]
    Invalid(#[from] TerrainError),
}

/// Save a generation config to a RON file.
///
/// # Arguments
/// * `path` - File path to save to
/// * `config` - Generation config to save
pub fn save_preset(path: &Path, config: &GenerationConfig) -> Result<(), PresetIoError> {
    let pretty_config = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .separate_tuple_members(true);

    let ron_string = ron::ser::to_string_pretty(config, pretty_config)?;
    fs::write(path, ron_string)?;
    Ok(())
}

/// Load a generation config from a RON file.
///
/// Fields missing from the file fall back to the defaults. The loaded config
/// is validated before it is returned.
///
/// # Arguments
/// * `path` - File path to load from
pub fn load_preset(path: &Path) -> Result<GenerationConfig, PresetIoError> {
    let contents = fs::read_to_string(path)?;
    let config: GenerationConfig = ron::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tg_core::CoastlinePolicy;

    #[test]
    fn save_and_load_preset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("islands.ron");

        let config = GenerationConfig::with_sea_level(0.3)
            .with_size(128, 64)
            .with_policy(CoastlinePolicy::Unblended);
        save_preset(&path, &config).unwrap();

        let loaded = load_preset(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_preset_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.ron");
        fs::write(&path, "(sea_level: 0.4, width: 32)").unwrap();

        let loaded = load_preset(&path).unwrap();
        assert_eq!(loaded.sea_level, 0.4);
        assert_eq!(loaded.width, 32);
        assert_eq!(loaded.height, 400);
        assert_eq!(loaded.elevation_noise, GenerationConfig::default().elevation_noise);
    }

    #[test]
    fn invalid_preset_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.ron");
        fs::write(&path, "(sea_level: -3.0)").unwrap();

        assert!(matches!(
            load_preset(&path),
            Err(PresetIoError::Invalid(TerrainError::InvalidConfig(_)))
        ));
    }

    #[test]
    fn malformed_preset_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(sea_level: ").unwrap();

        assert!(matches!(
            load_preset(&path),
            Err(PresetIoError::RonSpanned(_))
        ));
    }
}
