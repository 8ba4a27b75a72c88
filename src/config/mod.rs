//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{PitchSpec, StatDirections};
use crate::storage::StorageConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,

    /// Directory of front-end assets served at `/`
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
            static_dir: None,
        }
    }
}

/// Dataset locations, relative to `data_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_players_csv")]
    pub players_csv: PathBuf,

    #[serde(default = "default_matches_file")]
    pub matches_file: PathBuf,

    #[serde(default = "default_matches_dir")]
    pub matches_dir: PathBuf,

    #[serde(default = "default_logos_dir")]
    pub logos_dir: PathBuf,
}

fn default_players_csv() -> PathBuf {
    PathBuf::from("aggregates/aus1league_physicalaggregates_20242025_midfielders.csv")
}

fn default_matches_file() -> PathBuf {
    PathBuf::from("matches.json")
}

fn default_matches_dir() -> PathBuf {
    PathBuf::from("matches")
}

fn default_logos_dir() -> PathBuf {
    PathBuf::from("aleague_logos")
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            players_csv: default_players_csv(),
            matches_file: default_matches_file(),
            matches_dir: default_matches_dir(),
            logos_dir: default_logos_dir(),
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Stats where a smaller value ranks higher (e.g. fouls)
    #[serde(default)]
    pub lower_is_better: Vec<String>,
}

impl RankingConfig {
    pub fn directions(&self) -> StatDirections {
        StatDirections::lower_is_better(self.lower_is_better.iter().cloned())
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub datasets: DatasetConfig,

    #[serde(default)]
    pub pitch: PitchSpec,

    #[serde(default)]
    pub ranking: RankingConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            datasets: DatasetConfig::default(),
            pitch: PitchSpec::default(),
            ranking: RankingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file if it exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        let datasets = [
            ("players_csv", &self.datasets.players_csv),
            ("matches_file", &self.datasets.matches_file),
            ("matches_dir", &self.datasets.matches_dir),
            ("logos_dir", &self.datasets.logos_dir),
        ];
        for (name, path) in datasets {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "datasets.{} must not be empty",
                    name
                )));
            }
        }

        self.pitch
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        Ok(())
    }

    /// Storage paths derived from `data_dir` and the dataset table.
    pub fn storage(&self) -> StorageConfig {
        StorageConfig {
            data_dir: self.data_dir.clone(),
            players_csv: self.datasets.players_csv.clone(),
            matches_file: self.datasets.matches_file.clone(),
            matches_dir: self.datasets.matches_dir.clone(),
            logos_dir: self.datasets.logos_dir.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StatDirection;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.datasets.matches_file, PathBuf::from("matches.json"));
        assert_eq!(config.pitch, PitchSpec::default());
        assert!(config.ranking.lower_is_better.is_empty());
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_dataset_path() {
        let mut config = AppConfig::default();
        config.datasets.players_csv = PathBuf::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("datasets.players_csv"));
    }

    #[test]
    fn test_config_validation_bad_pitch() {
        let mut config = AppConfig::default();
        config.pitch.goal_box_height = 50.0;

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("goal_box_height"));
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            data_dir = "/srv/opendata/data"

            [pitch]
            width = 105.0
            height = 68.0

            [ranking]
            lower_is_better = ["fouls", "turnovers"]
            "#,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/opendata/data"));
        assert_eq!(config.pitch.width, 105.0);
        assert_eq!(config.pitch.penalty_box_width, 18.0);
        assert_eq!(config.server.port, 8080);

        let directions = config.ranking.directions();
        assert_eq!(directions.direction("fouls"), StatDirection::LowerIsBetter);
        assert_eq!(directions.direction("shots"), StatDirection::HigherIsBetter);
    }

    #[test]
    fn test_storage_from_config() {
        let mut config = AppConfig::default();
        config.data_dir = PathBuf::from("/data");
        config.datasets.players_csv = PathBuf::from("players.csv");

        let storage = config.storage();
        assert_eq!(storage.players_csv_path(), PathBuf::from("/data/players.csv"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.data_dir, parsed.data_dir);
        assert_eq!(config.pitch, parsed.pitch);
    }
}
