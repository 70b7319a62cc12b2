//! Shared test utilities and fixtures for task mapper tests

use super::TaskMapper;
use crate::app::models::canonical::{
    CompoundIdentifier, CropZone, DataModel, Farm, Field, Grower, Note, Person,
};
use crate::app::models::document::IsoCommentAllocation;
use crate::app::services::collaborators::{CommentAllocationMapper, MappingContext};
use crate::app::services::identifier_map::{IdentifierLink, IdentifierMap};
use crate::app::services::quantity_dictionary::QuantityDictionary;
use crate::config::ConversionConfig;
use crate::{Error, Result};

pub mod stats_tests;

/// Session services with document ids for the catalog of [`create_catalog`]
pub struct Fixture {
    pub ids: IdentifierMap,
    pub dictionary: QuantityDictionary,
    pub config: ConversionConfig,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(ConversionConfig::default())
    }

    pub fn with_config(config: ConversionConfig) -> Self {
        let ids = IdentifierMap::with_links(&[
            IdentifierLink::new("CTR1", 10),
            IdentifierLink::new("FRM1", 20),
            IdentifierLink::new("PFD1", 30),
            IdentifierLink::new("PFD2", 40),
            IdentifierLink::new("WKR1", 100),
            IdentifierLink::new("WKR2", 101),
            IdentifierLink::new("GGP1", 200),
        ])
        .unwrap();

        Self {
            ids,
            dictionary: QuantityDictionary::builtin(),
            config,
        }
    }

    pub fn ctx(&self) -> MappingContext<'_> {
        MappingContext::new(&self.ids, &self.dictionary, &self.config)
    }
}

/// Catalog of one grower, farm, field, crop zone and two persons
pub fn create_catalog() -> DataModel {
    let mut model = DataModel::default();
    model.catalog.growers.push(Grower {
        id: CompoundIdentifier::new(10),
        name: "Hoekstra Farms".to_string(),
    });
    model.catalog.farms.push(Farm {
        id: CompoundIdentifier::new(20),
        description: "North".to_string(),
        grower_id: Some(10),
    });
    model.catalog.fields.push(Field {
        id: CompoundIdentifier::new(30),
        description: "Field 7".to_string(),
        farm_id: Some(20),
    });
    model.catalog.crop_zones.push(CropZone {
        id: CompoundIdentifier::new(40),
        description: "Field 7 wheat".to_string(),
        field_id: 30,
    });
    for (id, last_name) in [(100, "Jansen"), (101, "de Vries")] {
        model.catalog.persons.push(Person {
            id: CompoundIdentifier::new(id),
            last_name: last_name.to_string(),
        });
    }
    model
}

/// Comment collaborator that always fails with the given error
pub struct FailingComments(pub fn() -> Error);

impl CommentAllocationMapper for FailingComments {
    fn export_comment_allocations(
        &self,
        _ctx: &MappingContext<'_>,
        _notes: &[Note],
    ) -> Result<Vec<IsoCommentAllocation>> {
        Err((self.0)())
    }

    fn import_comment_allocations(
        &self,
        _ctx: &MappingContext<'_>,
        _allocations: &[IsoCommentAllocation],
    ) -> Result<Vec<Note>> {
        Err((self.0)())
    }
}

pub fn collaborator_failure() -> Error {
    Error::collaborator("comments", "coded comment list unavailable")
}

pub fn conflict_failure() -> Error {
    Error::conflicting_identifier("CCT1", 300, "already bound to 301")
}

/// Task mapper whose comment stage always fails
pub fn mapper_with_failing_comments(failure: fn() -> Error) -> TaskMapper {
    use crate::app::services::collaborators::Collaborators;
    TaskMapper::with_collaborators(
        Collaborators::default().with_comments(FailingComments(failure)),
    )
}
