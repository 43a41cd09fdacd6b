use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

use medsynth_generate::GenerationConfig;
use medsynth_generate::output::atomic::write_bytes_atomic;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("refusing to overwrite {0} (use --force)")]
    AlreadyExists(PathBuf),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub num_patients: Option<u32>,
    pub num_doctors: Option<u32>,
    pub num_allergies: Option<u32>,
    pub num_meds: Option<u32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub seed: Option<u64>,
    pub reference_date: Option<NaiveDate>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut GenerationConfig) {
        if let Some(value) = self.num_patients {
            config.num_patients = value;
        }
        if let Some(value) = self.num_doctors {
            config.num_doctors = value;
        }
        if let Some(value) = self.num_allergies {
            config.num_allergies = value;
        }
        if let Some(value) = self.num_meds {
            config.num_meds = value;
        }
        if let Some(value) = self.start_date {
            config.start_date = value;
        }
        if let Some(value) = self.end_date {
            config.end_date = value;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.reference_date.is_some() {
            config.reference_date = self.reference_date;
        }
    }
}

/// Read a TOML configuration, or the defaults when no file is given.
///
/// Keys missing from the file keep their default values.
pub fn load_config(path: Option<&Path>) -> ConfigResult<GenerationConfig> {
    match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        }
        None => Ok(GenerationConfig::default()),
    }
}

pub fn write_default_config(path: &Path, force: bool) -> ConfigResult<()> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    let encoded = toml::to_string_pretty(&GenerationConfig::default())?;
    write_bytes_atomic(path, encoded.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("medsynth-config-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn default_config_round_trips_through_file() {
        let path = temp_path("medsynth.toml");
        write_default_config(&path, false).expect("config written");

        let loaded = load_config(Some(&path)).expect("config loaded");
        assert_eq!(loaded, GenerationConfig::default());

        let again = write_default_config(&path, false);
        assert!(matches!(again, Err(ConfigError::AlreadyExists(_))));
        write_default_config(&path, true).expect("forced overwrite");

        if let Some(dir) = path.parent() {
            std::fs::remove_dir_all(dir).ok();
        }
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let config: GenerationConfig = toml::from_str(
            "num_patients = 50\nseed = 7\nend_date = \"2020-01-01\"\n",
        )
        .expect("valid toml");
        assert_eq!(config.num_patients, 50);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.end_date.to_string(), "2020-01-01");
        assert_eq!(config.num_doctors, 200);
    }

    #[test]
    fn overrides_win_over_file_values() {
        let mut config = GenerationConfig {
            num_patients: 50,
            seed: Some(1),
            ..GenerationConfig::default()
        };
        ConfigOverrides {
            num_patients: Some(10),
            seed: Some(2),
            ..ConfigOverrides::default()
        }
        .apply(&mut config);

        assert_eq!(config.num_patients, 10);
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.num_meds, 300);
    }
}
