//! JSON bundles exchanged with the command line tool
//!
//! A bundle carries a canonical model, the identifier pairs of earlier
//! conversions and a parsed TaskData document, so a conversion can pick up
//! where the previous one left off.

use crate::app::models::canonical::DataModel;
use crate::app::models::document::IsoTaskData;
use crate::app::services::identifier_map::IdentifierLink;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Canonical model, identifier pairs and TaskData document of one conversion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionBundle {
    pub model: DataModel,
    pub links: Vec<IdentifierLink>,
    pub task_data: IsoTaskData,
}

impl ConversionBundle {
    /// Read a bundle from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::io(format!("Failed to read bundle {}", path.display()), e))?;
        let bundle: Self = serde_json::from_str(&contents).map_err(|e| {
            Error::serialization(format!("Invalid bundle {}", path.display()), e)
        })?;

        debug!(
            "Loaded bundle {} ({} tasks, {} links)",
            path.display(),
            bundle.task_data.tasks.len(),
            bundle.links.len()
        );
        Ok(bundle)
    }

    /// Write the bundle as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            Error::serialization(format!("Failed to encode bundle {}", path.display()), e)
        })?;
        std::fs::write(path, contents)
            .map_err(|e| Error::io(format!("Failed to write bundle {}", path.display()), e))?;

        debug!("Saved bundle {}", path.display());
        Ok(())
    }
}
