//! Run configuration, read from `migrate.toml`.
//!
//! Every key is optional. A missing default file means built-in defaults;
//! an explicitly named file must exist.

use std::path::{Path, PathBuf};

use migrate_ingest::ReadOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pipeline::DatasetGroup;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "migrate.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("csv_delimiter must be a single ASCII character, got '{value}'")]
    InvalidDelimiter { value: char },

    #[error("lookup table names must not be empty")]
    EmptyLookup,

    #[error("unknown dataset group '{name}'")]
    UnknownGroup { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MigrationConfig {
    /// Directory holding the legacy exports.
    pub input_dir: PathBuf,
    /// Directory receiving the migrated datasets.
    pub output_dir: PathBuf,
    /// Repair-list reference sets, relative to `output_dir`.
    pub reference_dir: PathBuf,
    /// Where `duplicates.json` is written; no audit file when unset.
    pub diagnostics_dir: Option<PathBuf>,
    pub csv_delimiter: char,
    pub groups: GroupsConfig,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("file/old"),
            output_dir: PathBuf::from("file/new"),
            reference_dir: PathBuf::from("reference"),
            diagnostics_dir: None,
            csv_delimiter: ';',
            groups: GroupsConfig::default(),
        }
    }
}

/// Which dataset groups a run includes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GroupsConfig {
    pub repair_list: bool,
    pub circuits: bool,
    pub clients: bool,
    pub defects: bool,
    /// Lookup fields; each reads and writes `tbl{field}`.
    pub lookups: Vec<String>,
}

impl Default for GroupsConfig {
    fn default() -> Self {
        Self {
            repair_list: true,
            circuits: true,
            clients: true,
            defects: true,
            lookups: vec![
                "InvElectrex".to_string(),
                "Marca".to_string(),
                "MigElectrex".to_string(),
            ],
        }
    }
}

impl MigrationConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Loads `explicit`, else `migrate.toml` if present, else defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(default_path)
        } else {
            tracing::debug!("no config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.read_options()?;
        if self.groups.lookups.iter().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::EmptyLookup);
        }
        Ok(())
    }

    pub fn read_options(&self) -> Result<ReadOptions, ConfigError> {
        let delimiter = u8::try_from(self.csv_delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or(ConfigError::InvalidDelimiter {
                value: self.csv_delimiter,
            })?;
        Ok(ReadOptions {
            csv_delimiter: delimiter,
        })
    }

    pub fn reference_output_dir(&self) -> PathBuf {
        self.output_dir.join(&self.reference_dir)
    }

    /// Enabled groups in run order.
    pub fn dataset_groups(&self) -> Vec<DatasetGroup> {
        let groups = &self.groups;
        let mut selected = Vec::new();
        if groups.repair_list {
            selected.push(DatasetGroup::RepairList);
        }
        if groups.circuits {
            selected.push(DatasetGroup::Circuits);
        }
        if groups.clients {
            selected.push(DatasetGroup::Clients);
        }
        if groups.defects {
            selected.push(DatasetGroup::Defects);
        }
        selected.extend(groups.lookups.iter().cloned().map(DatasetGroup::Lookup));
        selected
    }

    /// Enabled groups restricted to `names` (all of them when empty).
    pub fn select_groups(&self, names: &[String]) -> Result<Vec<DatasetGroup>, ConfigError> {
        let groups = self.dataset_groups();
        if names.is_empty() {
            return Ok(groups);
        }
        if let Some(unknown) = names
            .iter()
            .find(|name| !groups.iter().any(|group| group.name() == name.as_str()))
        {
            return Err(ConfigError::UnknownGroup {
                name: unknown.clone(),
            });
        }
        Ok(groups
            .into_iter()
            .filter(|group| names.iter().any(|name| name == group.name()))
            .collect())
    }
}
