//! JSON synthesizer configuration files.

use std::fs;
use std::path::Path;

use xraysim_core::SynthesizerConfig;

use crate::Result;

/// Reads and validates a configuration file.
///
/// Missing fields take their default values.
///
/// # Errors
/// Fails if the file cannot be read or parsed, or if a constant is unusable.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SynthesizerConfig> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let config: SynthesizerConfig = serde_json::from_str(&text)?;
    config.validate()?;
    log::debug!("loaded synthesizer config from {}", path.display());
    Ok(config)
}

/// Writes `config` as pretty-printed JSON.
///
/// # Errors
/// Fails on I/O or serialization errors.
pub fn save_config<P: AsRef<Path>>(path: P, config: &SynthesizerConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use tempfile::NamedTempFile;

    #[test]
    fn test_save_then_load() {
        let file = NamedTempFile::new().unwrap();
        let config = SynthesizerConfig::new()
            .with_max_kvp(150.0)
            .with_default_image_size(256);
        save_config(file.path(), &config).unwrap();
        assert_eq!(load_config(file.path()).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{ "default_beam_std": 0.25 }"#).unwrap();
        let config = load_config(file.path()).unwrap();
        assert!((config.default_beam_std - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.default_image_size, 512);
    }

    #[test]
    fn test_invalid_constant_is_rejected() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), r#"{ "max_ma": -1.0 }"#).unwrap();
        assert!(matches!(
            load_config(file.path()),
            Err(Error::Core(xraysim_core::Error::Config(_)))
        ));
    }

    #[test]
    fn test_malformed_json() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ not json").unwrap();
        assert!(matches!(load_config(file.path()), Err(Error::Json(_))));
    }
}
