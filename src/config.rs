//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};
use crate::social::DEFAULT_NEARBY_RADIUS_KM;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the database file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Database file name, or `:memory:`
    #[serde(default = "default_db_file_name")]
    pub db_file_name: String,

    /// Directory for rotated log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Log file prefix
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Radius for nearby users and suggestions
    #[serde(default = "default_nearby_radius")]
    pub nearby_radius_km: f64,

    /// Write the demo users into an empty collection
    #[serde(default = "default_true")]
    pub seed_demo_users: bool,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_db_file_name() -> String {
    "goals.db".to_string()
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}
fn default_app_name() -> String {
    "GoalTracker".to_string()
}
fn default_nearby_radius() -> f64 {
    DEFAULT_NEARBY_RADIUS_KM
}
fn default_true() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            db_file_name: default_db_file_name(),
            log_dir: default_log_dir(),
            app_name: default_app_name(),
            nearby_radius_km: default_nearby_radius(),
            seed_demo_users: true,
        }
    }
}

impl AppConfig {
    /// Load config from a JSON file; missing fields take their defaults
    pub fn load<P: AsRef<Path>>(path: P) -> DomainResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Internal(format!("Failed to read config {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DomainError::InvalidInput(format!("Invalid config {}: {}", path.display(), e)))
    }

    /// Load config if the file exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> DomainResult<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> DomainResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| DomainError::Internal(format!("Failed to write config: {}", e)))
    }

    /// Database location; `:memory:` is passed through untouched
    pub fn db_path(&self) -> PathBuf {
        if self.db_file_name == ":memory:" {
            PathBuf::from(":memory:")
        } else {
            self.data_dir.join(&self.db_file_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.db_path(), PathBuf::from("data").join("goals.db"));
        assert_eq!(config.app_name, "GoalTracker");
        assert_eq!(config.nearby_radius_km, 50.0);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "data_dir": "/var/goals", "nearby_radius_km": 25.0 }"#).unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/var/goals/goals.db"));
        assert_eq!(config.nearby_radius_km, 25.0);
        assert!(config.seed_demo_users);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            db_file_name: ":memory:".into(),
            seed_demo_users: false,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.db_path(), PathBuf::from(":memory:"));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(DomainError::InvalidInput(_))));

        let missing = AppConfig::load_or_default(dir.path().join("missing.json")).unwrap();
        assert_eq!(missing, AppConfig::default());
    }
}
