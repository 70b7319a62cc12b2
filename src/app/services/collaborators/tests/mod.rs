//! Shared test utilities and fixtures for collaborator tests

use super::MappingContext;
use crate::app::services::identifier_map::{IdentifierLink, IdentifierMap};
use crate::app::services::quantity_dictionary::QuantityDictionary;
use crate::config::ConversionConfig;

pub mod allocation_tests;
pub mod prescription_tests;

/// Session services seeded with a small catalog of document ids
pub struct Fixture {
    pub ids: IdentifierMap,
    pub dictionary: QuantityDictionary,
    pub config: ConversionConfig,
}

impl Fixture {
    pub fn new() -> Self {
        let ids = IdentifierMap::with_links(&[
            IdentifierLink::new("CTR1", 10),
            IdentifierLink::new("FRM1", 20),
            IdentifierLink::new("PFD1", 30),
            IdentifierLink::new("PFD2", 40),
            IdentifierLink::new("WKR1", 100),
            IdentifierLink::new("GGP1", 200),
            IdentifierLink::new("CCT1", 300),
            IdentifierLink::new("CCL1", 301),
        ])
        .unwrap();

        Self {
            ids,
            dictionary: QuantityDictionary::builtin(),
            config: ConversionConfig::default(),
        }
    }

    pub fn ctx(&self) -> MappingContext<'_> {
        MappingContext::new(&self.ids, &self.dictionary, &self.config)
    }
}
