//! Quantity dictionary for DDI-encoded process data
//!
//! ISO 11783 logs physical quantities as integers tagged with a data
//! dictionary identifier (DDI). The DDI determines what the value means, its
//! unit and the resolution used to scale it. This module provides O(1) lookups
//! by DDI, the reverse lookup from a canonical representation to its DDI, and
//! the numeric codec that converts between raw and physical values.
//!
//! # Architecture
//!
//! - [`builtin`] - the default table of common ISO 11783-11 entries
//! - [`codec`] - scaling rules and value-level encode/decode
//! - [`ddi_export`] - loader for the ISOBUS DDI export text format

use crate::app::models::canonical::Representation;
use crate::constants::{format_ddi, parse_ddi};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod builtin;
pub mod codec;
pub mod ddi_export;

#[cfg(test)]
pub mod tests;

pub use codec::{EncodedValue, decode_scaled, effective_resolution, encode_scaled};

/// Physical representation kind of a DDI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepresentationKind {
    /// Scaled numeric quantity with a unit
    Numeric,
    /// Enumerated state or mode without a unit
    Enumerated,
}

/// Definition of one data dictionary entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityDefinition {
    /// Data dictionary identifier
    pub ddi: u16,

    /// Human-readable name
    pub description: String,

    /// Representation kind
    pub kind: RepresentationKind,

    /// Unit of measure of the physical value (absent for enumerations)
    pub unit: Option<String>,

    /// Physical value of one raw increment; zero is treated as 1
    pub resolution: f64,

    /// Canonical representation code, when one is known
    pub representation_code: Option<String>,
}

impl QuantityDefinition {
    /// Create a numeric definition
    pub fn numeric(ddi: u16, description: &str, unit: &str, resolution: f64) -> Self {
        Self {
            ddi,
            description: description.to_string(),
            kind: RepresentationKind::Numeric,
            unit: Some(unit.to_string()),
            resolution,
            representation_code: None,
        }
    }

    /// Create an enumerated definition
    pub fn enumerated(ddi: u16, description: &str) -> Self {
        Self {
            ddi,
            description: description.to_string(),
            kind: RepresentationKind::Enumerated,
            unit: None,
            resolution: 1.0,
            representation_code: None,
        }
    }

    /// Attach a canonical representation code
    pub fn with_representation(mut self, code: &str) -> Self {
        self.representation_code = Some(code.to_string());
        self
    }

    /// Canonical representation for values of this DDI
    ///
    /// Falls back to the 4-digit DDI code when no representation code is known.
    pub fn representation(&self) -> Representation {
        Representation {
            code: self
                .representation_code
                .clone()
                .unwrap_or_else(|| format_ddi(self.ddi)),
            description: self.description.clone(),
        }
    }
}

/// DDI lookup table with a reverse index by representation code
#[derive(Debug, Clone, Default)]
pub struct QuantityDictionary {
    /// Definitions indexed by DDI
    definitions: HashMap<u16, QuantityDefinition>,

    /// Representation code -> DDI
    by_representation: HashMap<String, u16>,
}

impl QuantityDictionary {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dictionary holding the built-in ISO 11783-11 entries
    pub fn builtin() -> Self {
        let mut dictionary = Self::new();
        dictionary.extend(builtin::definitions());
        dictionary
    }

    /// Insert or replace a definition
    ///
    /// A replacement without a representation code keeps the code of the
    /// definition it replaces.
    pub fn insert(&mut self, mut definition: QuantityDefinition) {
        if let Some(previous) = self.definitions.get(&definition.ddi) {
            if definition.representation_code.is_none() {
                definition.representation_code = previous.representation_code.clone();
            } else if previous.representation_code != definition.representation_code {
                if let Some(code) = &previous.representation_code {
                    self.by_representation.remove(code);
                }
            }
        }

        if let Some(code) = &definition.representation_code {
            self.by_representation.insert(code.clone(), definition.ddi);
        }
        self.definitions.insert(definition.ddi, definition);
    }

    /// Insert every definition from an iterator
    pub fn extend<I>(&mut self, definitions: I)
    where
        I: IntoIterator<Item = QuantityDefinition>,
    {
        for definition in definitions {
            self.insert(definition);
        }
    }

    /// Get the definition of a DDI (O(1) lookup)
    pub fn lookup(&self, ddi: u16) -> Option<&QuantityDefinition> {
        self.definitions.get(&ddi)
    }

    /// Get the definition for a textual DDI code
    pub fn lookup_code(&self, code: &str) -> Option<&QuantityDefinition> {
        parse_ddi(code).and_then(|ddi| self.lookup(ddi))
    }

    /// Canonical representation for a DDI
    pub fn representation_for(&self, ddi: u16) -> Option<Representation> {
        self.lookup(ddi).map(QuantityDefinition::representation)
    }

    /// Unit of measure for a DDI; `None` for unknown DDIs and enumerations
    pub fn unit_for(&self, ddi: u16) -> Option<&str> {
        self.lookup(ddi).and_then(|d| d.unit.as_deref())
    }

    /// Resolve a canonical representation to its DDI
    ///
    /// Matches the representation code first, then a 4-digit DDI code that is
    /// present in the dictionary.
    pub fn resolve_representation(&self, representation: &Representation) -> Option<u16> {
        if let Some(ddi) = self.by_representation.get(&representation.code) {
            return Some(*ddi);
        }
        parse_ddi(&representation.code).filter(|ddi| self.definitions.contains_key(ddi))
    }

    /// Check if a DDI is defined
    pub fn contains(&self, ddi: u16) -> bool {
        self.definitions.contains_key(&ddi)
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the dictionary has no definitions
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// All defined DDIs in ascending order
    pub fn ddis(&self) -> Vec<u16> {
        let mut ddis: Vec<u16> = self.definitions.keys().copied().collect();
        ddis.sort_unstable();
        ddis
    }
}
