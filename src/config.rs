//! Configuration management and validation.
//!
//! Provides the settings that shape a conversion session: identifier
//! generation, unique-id bookkeeping, prescription grid output, time log
//! storage and the stage failure policy.

use crate::constants::{DEFAULT_ISO_ID_SOURCE, grid_type, id_prefixes};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Global configuration for TaskData conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Prefix used when generating task identifiers
    pub task_id_prefix: String,

    /// Unique-id source marking document identifiers on canonical entities
    pub iso_id_source: String,

    /// Grid type written for exported prescriptions (1 or 2)
    pub grid_type: u8,

    /// Directory where time log collaborators store their binary files
    pub task_data_path: PathBuf,

    /// Optional ISOBUS DDI export file merged over the built-in dictionary
    pub ddi_export_path: Option<PathBuf>,

    /// Propagate every stage failure instead of degrading the stage
    pub strict_stages: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            task_id_prefix: id_prefixes::TASK.to_string(),
            iso_id_source: DEFAULT_ISO_ID_SOURCE.to_string(),
            grid_type: grid_type::TYPE_2,
            task_data_path: PathBuf::from("TASKDATA"),
            ddi_export_path: None,
            strict_stages: false,
        }
    }
}

impl ConversionConfig {
    /// Load configuration from a JSON file, filling omitted fields with defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::serialization(format!("Invalid config file {}", path.display()), e)
        })?;
        config.validate()?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the task identifier prefix
    pub fn with_task_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.task_id_prefix = prefix.into();
        self
    }

    /// Set the unique-id source for document identifiers
    pub fn with_iso_id_source(mut self, source: impl Into<String>) -> Self {
        self.iso_id_source = source.into();
        self
    }

    /// Set the prescription grid type
    pub fn with_grid_type(mut self, grid_type: u8) -> Self {
        self.grid_type = grid_type;
        self
    }

    /// Set the TaskData storage directory
    pub fn with_task_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.task_data_path = path.into();
        self
    }

    /// Merge a DDI export file over the built-in dictionary
    pub fn with_ddi_export(mut self, path: impl Into<PathBuf>) -> Self {
        self.ddi_export_path = Some(path.into());
        self
    }

    /// Propagate stage failures instead of degrading them
    pub fn with_strict_stages(mut self) -> Self {
        self.strict_stages = true;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.task_id_prefix.trim().is_empty() {
            return Err(Error::configuration("Task id prefix cannot be empty"));
        }

        if self.task_id_prefix.chars().any(|c| c.is_ascii_digit() || c == '-') {
            return Err(Error::configuration(format!(
                "Task id prefix '{}' must not contain digits or '-'",
                self.task_id_prefix
            )));
        }

        if self.iso_id_source.trim().is_empty() {
            return Err(Error::configuration("ISO id source cannot be empty"));
        }

        if self.grid_type != grid_type::TYPE_1 && self.grid_type != grid_type::TYPE_2 {
            return Err(Error::configuration(format!(
                "Invalid grid type {}: must be 1 or 2",
                self.grid_type
            )));
        }

        Ok(())
    }
}
