//! Tests for whole-document import and export

use super::*;
use crate::Error;
use crate::app::models::canonical::{
    Grower, LoggedData, NumericRepresentationValue, PersonRole, Prescription, PrescriptionRate,
    Representation, WorkItem, WorkItemOperation,
};
use crate::app::models::document::{IsoTaskData, IsoTime, IsoTimeType, IsoTreatmentZone};
use crate::app::services::session::{ConversionSession, TaskKind};
use crate::config::ConversionConfig;
use std::io::Write;
use tempfile::NamedTempFile;

fn session() -> ConversionSession {
    let session = ConversionSession::new(ConversionConfig::default()).unwrap();
    session.seed_links(&catalog_links()).unwrap();
    session
}

#[test]
fn test_new_rejects_invalid_config() {
    let err = ConversionSession::new(ConversionConfig::default().with_grid_type(3)).unwrap_err();
    assert!(matches!(err, Error::Configuration { .. }));
}

#[test]
fn test_new_loads_ddi_export() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "DD Entity: 57344 Custom Counter").unwrap();
    writeln!(file, "Unit: count - Quantity/Count").unwrap();
    writeln!(file, "Resolution: 1").unwrap();

    let config = ConversionConfig::default().with_ddi_export(file.path());
    let session = ConversionSession::new(config).unwrap();

    assert!(session.dictionary().contains(0xE000));
    assert!(session.dictionary().contains(0x0074));
}

#[test]
fn test_new_fails_on_missing_ddi_export() {
    let config = ConversionConfig::default().with_ddi_export("/nonexistent/ddi_export.txt");
    let err = ConversionSession::new(config).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn test_task_classification() {
    assert_eq!(TaskKind::of(&logged_task("TSK1", "TLG1")), TaskKind::LoggedRecord);
    assert_eq!(TaskKind::of(&planned_task("TSK2")), TaskKind::WorkOrder);

    let running = IsoTask::new("TSK3", IsoTaskStatus::Running);
    assert_eq!(TaskKind::of(&running), TaskKind::LoggedRecord);

    let mut prescribed = IsoTask::new("TSK4", IsoTaskStatus::Running);
    prescribed.treatment_zones = vec![IsoTreatmentZone::default()];
    assert_eq!(TaskKind::of(&prescribed), TaskKind::WorkOrder);

    prescribed.times = vec![IsoTime {
        time_type: Some(IsoTimeType::Effective),
        ..Default::default()
    }];
    assert_eq!(TaskKind::of(&prescribed), TaskKind::LoggedRecord);
}

#[test]
fn test_import_appends_records_in_document_order() {
    let mut session = session();
    let mut model = create_catalog();
    let task_data = IsoTaskData {
        tasks: vec![
            logged_task("TSK1", "TLG00001"),
            planned_task("TSK2"),
            IsoTask::new("TSK3", IsoTaskStatus::Running),
        ],
    };

    session.import_task_data(&mut model, &task_data).unwrap();

    let work_items = &model.documents.work_items;
    assert_eq!(work_items.len(), 1);
    assert_eq!(unique_id(&work_items[0].id), Some("TSK2"));
    assert_eq!(work_items[0].farm_id, Some(20));

    let logged: Vec<Option<&str>> = model
        .documents
        .logged_data
        .iter()
        .map(|record| unique_id(&record.id))
        .collect();
    assert_eq!(logged, vec![Some("TSK1"), Some("TSK3")]);
    assert_eq!(model.documents.logged_data[0].field_id, Some(30));

    assert_eq!(session.stats().records_imported(), 3);
    assert!(session.ids().contains_external("TLG00001"));
}

#[test]
fn test_minted_ids_stay_below_model_ids() {
    let mut session = session();
    let mut model = create_catalog();
    model.catalog.person_roles.push(PersonRole {
        id: CompoundIdentifier::new(-7),
        person_id: 100,
        time_scopes: Vec::new(),
    });
    let task_data = IsoTaskData {
        tasks: vec![planned_task("TSK2")],
    };

    session.import_task_data(&mut model, &task_data).unwrap();

    assert!(model.documents.work_items[0].id.reference_id < -7);
}

#[test]
fn test_reimporting_the_same_task_is_a_conflict() {
    let mut session = session();
    let mut model = create_catalog();
    let task_data = IsoTaskData {
        tasks: vec![planned_task("TSK2")],
    };

    session.import_task_data(&mut model, &task_data).unwrap();
    let err = session.import_task_data(&mut model, &task_data).unwrap_err();

    assert!(matches!(err, Error::ConflictingIdentifier { .. }));
}

#[test]
fn test_export_logged_data() {
    let mut session = session();
    let mut model = create_catalog();
    model.documents.logged_data.push(LoggedData {
        id: CompoundIdentifier::new(5),
        grower_id: Some(10),
        field_id: Some(30),
        ..Default::default()
    });

    let task_data = session.export_task_data(&model).unwrap();

    assert_eq!(task_data.tasks.len(), 1);
    let task = &task_data.tasks[0];
    assert_eq!(task.task_id, "TSK1");
    assert_eq!(task.customer_id_ref.as_deref(), Some("CTR1"));
    assert_eq!(task.partfield_id_ref.as_deref(), Some("PFD1"));
    assert!(session.links().contains(&IdentifierLink::new("TSK1", 5)));
    assert_eq!(session.stats().tasks_exported, 1);
}

#[test]
fn test_export_is_stable_within_a_session() {
    let mut session = session();
    let mut model = create_catalog();
    model.documents.logged_data.push(LoggedData {
        id: CompoundIdentifier::new(5),
        ..Default::default()
    });

    let first = session.export_task_data(&model).unwrap();
    let second = session.export_task_data(&model).unwrap();

    assert_eq!(first.tasks[0].task_id, second.tasks[0].task_id);
}

#[test]
fn test_seed_links_rejects_contradicting_pairs() {
    let session = session();
    let err = session
        .seed_links(&[IdentifierLink::new("CTR1", 11)])
        .unwrap_err();

    assert!(matches!(err, Error::ConflictingIdentifier { .. }));
    assert_eq!(lowest(session.links().iter().map(|l| l.internal)), 10);
}

#[test]
fn test_import_fails_when_reference_ids_run_out() {
    let mut session = session();
    let mut model = create_catalog();
    model.catalog.growers.push(Grower {
        id: CompoundIdentifier::new(i32::MIN),
        name: "Lowest".to_string(),
    });
    let task_data = IsoTaskData {
        tasks: vec![planned_task("TSK2")],
    };

    let err = session.import_task_data(&mut model, &task_data).unwrap_err();

    assert!(matches!(err, Error::IdentifiersExhausted { .. }));
    assert!(model.documents.work_items.is_empty());
}

fn prescribed_work_item(id: ReferenceId, operation_id: ReferenceId) -> WorkItem {
    WorkItem {
        id: CompoundIdentifier::new(id),
        field_id: Some(30),
        work_item_operation_ids: vec![operation_id],
        ..Default::default()
    }
}

#[test]
fn test_work_items_sharing_a_prescription_get_distinct_tasks() {
    let mut model = create_catalog();
    model.catalog.prescriptions.push(Prescription {
        id: CompoundIdentifier::new(500),
        description: "Variable rate nitrogen".to_string(),
        field_id: Some(30),
        crop_zone_id: None,
        rates: vec![PrescriptionRate {
            zone_code: 1,
            zone_name: None,
            rate: NumericRepresentationValue {
                representation: Representation::new("vrAppRateMassSetPoint"),
                unit: "mg1m-2".to_string(),
                value: 250_000.0,
            },
        }],
        grid: None,
    });
    for operation_id in [510, 511] {
        model.documents.work_item_operations.push(WorkItemOperation {
            id: CompoundIdentifier::new(operation_id),
            prescription_id: Some(500),
        });
    }
    model.documents.work_items.push(prescribed_work_item(520, 510));
    model.documents.work_items.push(prescribed_work_item(521, 511));

    let task_data = session().export_task_data(&model).unwrap();
    let task_ids: Vec<&str> = task_data.tasks.iter().map(|t| t.task_id.as_str()).collect();
    assert_eq!(task_ids.len(), 2);
    assert_ne!(task_ids[0], task_ids[1]);

    let mut imported = create_catalog();
    let mut second = session();
    second.import_task_data(&mut imported, &task_data).unwrap();
    assert_eq!(imported.documents.work_items.len(), 2);
    assert_eq!(imported.catalog.prescriptions.len(), 2);
}

#[test]
fn test_catalog_links_leave_out_document_ids() {
    let mut session = session();
    let mut model = create_catalog();
    let task_data = IsoTaskData {
        tasks: vec![logged_task("TSK1", "TLG00001")],
    };

    session.import_task_data(&mut model, &task_data).unwrap();

    assert!(session.ids().contains_external("TSK1"));
    assert_eq!(session.catalog_links(), catalog_links());
}
