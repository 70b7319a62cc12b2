//! Loader for the ISOBUS data dictionary export text format
//!
//! The export lists one entity per block:
//!
//! ```text
//! DD Entity: 116 Total Area
//! Definition: Accumulated Area
//! Unit: m² - Area
//! Resolution: 1
//! ```
//!
//! Only the entity line, the unit line and the resolution line are used. A
//! unit of `n.a.` (or no unit line at all) marks an enumerated entity.

use super::{QuantityDefinition, QuantityDictionary};
use crate::{Error, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

static ENTITY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^DD Entity:\s*(\d+)\s+(.+?)(?:\s+as\s+\[.*\])?\s*$").unwrap()
});

static UNIT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Unit:\s*(.*?)(?:\s+-(?:\s.*)?)?$").unwrap());

static RESOLUTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Resolution:\s*([0-9.,eE+-]+)\s*$").unwrap());

/// Entity being assembled from the lines of one block
struct PendingEntity {
    line: usize,
    ddi: u16,
    name: String,
    unit: Option<String>,
    resolution: f64,
}

impl PendingEntity {
    fn into_definition(self) -> QuantityDefinition {
        match self.unit {
            Some(unit) => {
                QuantityDefinition::numeric(self.ddi, &self.name, &unit, self.resolution)
            }
            None => QuantityDefinition::enumerated(self.ddi, &self.name),
        }
    }
}

fn is_unitless(unit: &str) -> bool {
    let unit = unit.trim();
    unit.is_empty()
        || unit.eq_ignore_ascii_case("n.a.")
        || unit.eq_ignore_ascii_case("not defined")
}

fn parse_resolution(line: usize, text: &str) -> Result<f64> {
    let normalized = text.replace(',', ".");
    normalized.parse::<f64>().map_err(|e| {
        Error::dictionary_parse(line, format!("invalid resolution '{}': {}", text, e))
    })
}

/// Parse DDI export text into definitions, in file order
pub fn parse_ddi_export(text: &str) -> Result<Vec<QuantityDefinition>> {
    let mut definitions = Vec::new();
    let mut pending: Option<PendingEntity> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();

        if let Some(captures) = ENTITY_LINE.captures(line) {
            if let Some(entity) = pending.take() {
                definitions.push(entity.into_definition());
            }

            let number = &captures[1];
            let ddi = number.parse::<u16>().map_err(|_| {
                Error::dictionary_parse(line_number, format!("DDI {} out of range", number))
            })?;

            pending = Some(PendingEntity {
                line: line_number,
                ddi,
                name: captures[2].trim().to_string(),
                unit: None,
                resolution: 1.0,
            });
            continue;
        }

        let Some(entity) = pending.as_mut() else {
            continue;
        };

        if let Some(captures) = UNIT_LINE.captures(line) {
            let unit = &captures[1];
            entity.unit = (!is_unitless(unit)).then(|| unit.to_string());
        } else if let Some(captures) = RESOLUTION_LINE.captures(line) {
            entity.resolution = parse_resolution(line_number, &captures[1])?;
        } else if line.starts_with("Resolution:") {
            return Err(Error::dictionary_parse(
                line_number,
                format!(
                    "malformed resolution for DDI {} declared at line {}",
                    entity.ddi, entity.line
                ),
            ));
        }
    }

    if let Some(entity) = pending.take() {
        definitions.push(entity.into_definition());
    }

    debug!("Parsed {} DDI export entities", definitions.len());
    Ok(definitions)
}

impl QuantityDictionary {
    /// Built-in dictionary overlaid with the entities of a DDI export text
    pub fn from_ddi_export(text: &str) -> Result<Self> {
        let mut dictionary = Self::builtin();
        dictionary.extend(parse_ddi_export(text)?);
        Ok(dictionary)
    }

    /// Read a DDI export file and overlay it on the built-in dictionary
    pub fn load_ddi_export(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read DDI export {}", path.display()), e)
        })?;

        let dictionary = Self::from_ddi_export(&text)?;
        info!(
            "Loaded {} DDI definitions from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }
}
