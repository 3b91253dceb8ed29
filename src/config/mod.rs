use serde::Deserialize;

use crate::constants::*;

/// Application configuration with sensible defaults.
///
/// Can be overridden via ~/.config/rigmon/config.toml
#[derive(Debug, Clone)]
pub struct Config {
    /// Refresh interval in milliseconds. Floored at [`MIN_REFRESH_MS`]
    /// because the CPU sample window paces the tick.
    pub refresh_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_MS,
        }
    }
}

/// TOML-deserializable config file format.
/// All fields are optional — missing fields use defaults.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    refresh_interval_ms: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/rigmon/config.toml, falling back to
    /// defaults for any missing fields. If the file doesn't exist, returns
    /// pure defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Config::default(), // No config file — use defaults
        };

        match Self::from_toml_str(&content) {
            Ok(c) => c,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to parse {}: {}. Using defaults.",
                    config_path.display(),
                    e
                );
                Config::default()
            }
        }
    }

    /// Parse a TOML document and merge it over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let file_config: FileConfig = toml::from_str(content)?;
        let mut config = Config::default();

        if let Some(v) = file_config.refresh_interval_ms {
            config.refresh_interval_ms = v.max(MIN_REFRESH_MS);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_MS);
    }

    #[test]
    fn refresh_interval_is_floored() {
        let config = Config::from_toml_str("refresh_interval_ms = 50").unwrap();
        assert_eq!(config.refresh_interval_ms, MIN_REFRESH_MS);
    }

    #[test]
    fn refresh_interval_above_floor_is_kept() {
        let config = Config::from_toml_str("refresh_interval_ms = 2500").unwrap();
        assert_eq!(config.refresh_interval_ms, 2500);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = Config::from_toml_str("colour = \"mauve\"").unwrap();
        assert_eq!(config.refresh_interval_ms, DEFAULT_REFRESH_MS);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml_str("refresh_interval_ms = = 9").is_err());
    }

    #[test]
    fn reads_a_real_file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "refresh_interval_ms = 3000").unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        let config = Config::from_toml_str(&content).unwrap();
        assert_eq!(config.refresh_interval_ms, 3000);
    }
}
