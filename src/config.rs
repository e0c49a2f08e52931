use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("invalid config {}", .path.display())]
    Yaml { path: PathBuf, #[source] source: serde_yaml::Error },
    #[error("team size must be a positive integer")]
    InvalidTeamSize,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DealerConfig {
    pub team_size: usize,
    /// Directory holding the catalogs and receiving the outputs.
    pub storage: PathBuf,
    /// Fixed seed for the random source; drawn from the OS when absent.
    pub seed: Option<u64>,
    pub files: FileNames,
}

/// File names inside the storage directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileNames {
    pub individuals: String,
    pub resources: String,
    pub bindings: String,
    pub allocation: String,
    pub audit: String,
}

impl Default for DealerConfig {
    fn default() -> Self {
        DealerConfig {
            team_size: 2,
            storage: PathBuf::from("."),
            seed: None,
            files: FileNames::default(),
        }
    }
}

impl Default for FileNames {
    fn default() -> Self {
        FileNames {
            individuals: "students.txt".to_string(),
            resources: "projects.txt".to_string(),
            bindings: "initial_distribution.txt".to_string(),
            allocation: "distribution.txt".to_string(),
            audit: "log.txt".to_string(),
        }
    }
}

impl DealerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.team_size == 0 {
            return Err(ConfigError::InvalidTeamSize);
        }
        Ok(())
    }

    pub fn allocation_path(&self) -> PathBuf {
        self.storage.join(&self.files.allocation)
    }

    pub fn audit_path(&self) -> PathBuf {
        self.storage.join(&self.files.audit)
    }
}

pub fn read_config(path: &Path) -> Result<DealerConfig, ConfigError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
    serde_yaml::from_str(&text)
        .map_err(|source| ConfigError::Yaml { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config: DealerConfig = serde_yaml::from_str("team_size: 3\nfiles:\n  audit: trail.txt\n").unwrap();
        assert_eq!(config.team_size, 3);
        assert_eq!(config.storage, PathBuf::from("."));
        assert_eq!(config.seed, None);
        assert_eq!(config.files.audit, "trail.txt");
        assert_eq!(config.files.individuals, "students.txt");
        assert_eq!(config.audit_path(), PathBuf::from("./trail.txt"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<DealerConfig>("teamsize: 3\n").is_err());
    }

    #[test]
    fn zero_team_size_is_invalid() {
        let config = DealerConfig { team_size: 0, ..DealerConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTeamSize)));
        assert!(DealerConfig::default().validate().is_ok());
    }

    #[test]
    fn reads_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dealer.yaml");
        fs::write(&path, "team_size: 4\nstorage: testcase\nseed: 17\n").unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.team_size, 4);
        assert_eq!(config.storage, PathBuf::from("testcase"));
        assert_eq!(config.seed, Some(17));

        let err = read_config(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
