//! Shared test utilities and fixtures for session tests

use crate::app::models::canonical::{
    CompoundIdentifier, DataModel, Farm, Field, Grower, Person, ReferenceId,
};
use crate::app::models::document::{IsoTask, IsoTaskStatus, IsoTimeLog};
use crate::app::services::identifier_map::IdentifierLink;
use crate::constants::TIME_LOG_TYPE_BINARY;

pub mod session_tests;

/// Document ids of the catalog built by [`create_catalog`]
pub fn catalog_links() -> Vec<IdentifierLink> {
    vec![
        IdentifierLink::new("CTR1", 10),
        IdentifierLink::new("FRM1", 20),
        IdentifierLink::new("PFD1", 30),
        IdentifierLink::new("WKR1", 100),
    ]
}

/// Catalog of one grower, farm, field and person
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
    model.catalog.persons.push(Person {
        id: CompoundIdentifier::new(100),
        last_name: "Jansen".to_string(),
    });
    model
}

/// Task with a single binary time log
pub fn logged_task(task_id: &str, time_log: &str) -> IsoTask {
    let mut task = IsoTask::new(task_id, IsoTaskStatus::Completed);
    task.customer_id_ref = Some("CTR1".to_string());
    task.partfield_id_ref = Some("PFD1".to_string());
    task.time_logs = vec![IsoTimeLog {
        filename: time_log.to_string(),
        filelength: None,
        time_log_type: TIME_LOG_TYPE_BINARY,
    }];
    task
}

pub fn planned_task(task_id: &str) -> IsoTask {
    let mut task = IsoTask::new(task_id, IsoTaskStatus::Planned);
    task.farm_id_ref = Some("FRM1".to_string());
    task
}

pub fn unique_id(id: &CompoundIdentifier) -> Option<&str> {
    id.find_unique_id(crate::constants::DEFAULT_ISO_ID_SOURCE)
}

pub fn lowest(ids: impl IntoIterator<Item = ReferenceId>) -> ReferenceId {
    ids.into_iter().min().unwrap_or(0)
}
