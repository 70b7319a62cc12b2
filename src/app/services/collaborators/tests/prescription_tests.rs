//! Tests for the prescription collaborator

use super::*;
use crate::Error;
use crate::app::models::canonical::{
    CompoundIdentifier, DataModel, GridDefinition, NumericRepresentationValue, PersonRole,
    Prescription, PrescriptionRate, Representation, WorkItem,
};
use crate::app::models::document::{IsoTask, IsoTaskStatus};
use crate::app::services::collaborators::{DefaultPrescriptionMapper, PrescriptionMapper};

fn volume_rate(zone_code: u8, value: f64) -> PrescriptionRate {
    PrescriptionRate {
        zone_code,
        zone_name: Some(format!("Zone {}", zone_code)),
        rate: NumericRepresentationValue {
            representation: Representation::new("vrAppRateVolumeSetPoint"),
            unit: "mm3m-2".to_string(),
            value,
        },
    }
}

fn prescription() -> Prescription {
    Prescription {
        id: CompoundIdentifier::new(500),
        description: "Nitrogen top dressing".to_string(),
        field_id: Some(30),
        crop_zone_id: None,
        rates: vec![volume_rate(1, 150.0), volume_rate(2, 90.5)],
        grid: Some(GridDefinition {
            minimum_north: 52.1,
            minimum_east: 4.3,
            cell_north_size: 0.0001,
            cell_east_size: 0.0002,
            columns: 40,
            rows: 25,
        }),
    }
}

fn work_item() -> WorkItem {
    WorkItem {
        id: CompoundIdentifier::new(600),
        grower_id: Some(10),
        farm_id: Some(20),
        field_id: Some(30),
        crop_zone_id: Some(40),
        people_role_ids: vec![700],
        ..Default::default()
    }
}

fn model_with_role() -> DataModel {
    let mut model = DataModel::default();
    model.catalog.person_roles.push(PersonRole {
        id: CompoundIdentifier::new(700),
        person_id: 100,
        time_scopes: vec![],
    });
    model
}

#[test]
fn test_export_builds_planned_task() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();

    let task = DefaultPrescriptionMapper
        .export_prescription(&ctx, &model_with_role(), &work_item(), 2, &prescription())
        .unwrap();

    assert_eq!(task.task_id, "TSK1");
    assert_eq!(task.task_status, IsoTaskStatus::Planned);
    assert_eq!(task.task_designator.as_deref(), Some("Nitrogen top dressing"));
    assert_eq!(task.customer_id_ref.as_deref(), Some("CTR1"));
    assert_eq!(task.farm_id_ref.as_deref(), Some("FRM1"));
    // Crop zone of the work item wins over the field
    assert_eq!(task.partfield_id_ref.as_deref(), Some("PFD2"));
    assert_eq!(task.responsible_worker_id_ref.as_deref(), Some("WKR1"));

    assert_eq!(task.treatment_zones.len(), 2);
    let pdv = &task.treatment_zones[1].process_data_variables[0];
    assert_eq!(pdv.process_data_ddi, "0001");
    assert_eq!(pdv.process_data_value, 9050);

    let grid = task.grid.as_ref().unwrap();
    assert_eq!(grid.grid_type, 2);
    assert_eq!(grid.maximum_column, 40);
    assert_eq!(grid.treatment_zone_code, Some(1));
    assert_eq!(grid.filename, "GRD1");
    assert!(task.is_work_order());
}

#[test]
fn test_each_export_gets_its_own_task_id() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    let model = DataModel::default();

    let first = DefaultPrescriptionMapper
        .export_prescription(&ctx, &model, &work_item(), 1, &prescription())
        .unwrap();
    let second = DefaultPrescriptionMapper
        .export_prescription(&ctx, &model, &work_item(), 1, &prescription())
        .unwrap();

    assert_eq!(first.task_id, "TSK1");
    assert_eq!(second.task_id, "TSK2");
    assert_ne!(first.grid.unwrap().filename, second.grid.unwrap().filename);
    assert_eq!(fixture.ids.resolve_external(500), None);
}

#[test]
fn test_export_type_1_grid_has_no_zone_code() {
    let fixture = Fixture::new();

    let task = DefaultPrescriptionMapper
        .export_prescription(
            &fixture.ctx(),
            &DataModel::default(),
            &WorkItem::default(),
            1,
            &prescription(),
        )
        .unwrap();

    assert_eq!(task.grid.unwrap().treatment_zone_code, None);
    assert_eq!(task.responsible_worker_id_ref, None);
    assert_eq!(task.partfield_id_ref.as_deref(), Some("PFD1"));
}

#[test]
fn test_export_rejects_unknown_grid_type() {
    let fixture = Fixture::new();

    let err = DefaultPrescriptionMapper
        .export_prescription(
            &fixture.ctx(),
            &DataModel::default(),
            &work_item(),
            3,
            &prescription(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Collaborator { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_import_rebuilds_rates_and_grid() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    let exported = DefaultPrescriptionMapper
        .export_prescription(&ctx, &DataModel::default(), &work_item(), 2, &prescription())
        .unwrap();

    let imported = DefaultPrescriptionMapper
        .import_prescription(&ctx, &exported, &work_item())
        .unwrap();

    assert!(imported.id.reference_id < 0);
    assert_eq!(imported.description, "Nitrogen top dressing");
    assert_eq!(imported.crop_zone_id, Some(40));
    assert_eq!(imported.rates.len(), 2);
    assert_eq!(imported.rates[0].zone_name.as_deref(), Some("Zone 1"));
    assert!((imported.rates[1].rate.value - 90.5).abs() < 0.01);
    assert_eq!(imported.grid, prescription().grid);
}

#[test]
fn test_import_requires_prescription_content() {
    let fixture = Fixture::new();
    let task = IsoTask::new("TSK8", IsoTaskStatus::Planned);

    let err = DefaultPrescriptionMapper
        .import_prescription(&fixture.ctx(), &task, &WorkItem::default())
        .unwrap_err();
    assert!(matches!(err, Error::Collaborator { .. }));
}
