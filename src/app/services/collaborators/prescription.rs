//! Prescribed tasks <-> catalog prescriptions
//!
//! Rates are written as one treatment zone (TZN) per prescribed rate, each with
//! a single process data variable (PDV) encoded through the quantity
//! dictionary. The grid header is carried over; the binary grid cell file is
//! produced elsewhere.

use super::{MappingContext, PrescriptionMapper};
use crate::app::models::canonical::{
    CompoundIdentifier, DataModel, GridDefinition, Prescription, PrescriptionRate, WorkItem,
};
use crate::app::models::document::{
    IsoGrid, IsoProcessDataVariable, IsoTask, IsoTaskStatus, IsoTreatmentZone,
};
use crate::constants::grid_type::{TYPE_1 as GRID_TYPE_1, TYPE_2 as GRID_TYPE_2};
use crate::constants::id_prefixes;
use crate::{Error, Result};
use tracing::{debug, warn};

const COLLABORATOR: &str = "prescription";

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPrescriptionMapper;

impl DefaultPrescriptionMapper {
    fn export_zone(ctx: &MappingContext<'_>, rate: &PrescriptionRate) -> IsoTreatmentZone {
        let process_data_variables = match ctx.dictionary.encode_value(&rate.rate) {
            Some(encoded) => vec![IsoProcessDataVariable {
                process_data_ddi: encoded.ddi,
                process_data_value: encoded.raw,
            }],
            None => {
                warn!(
                    "Rate '{}' of zone {} has no DDI",
                    rate.rate.representation.code, rate.zone_code
                );
                Vec::new()
            }
        };

        IsoTreatmentZone {
            code: rate.zone_code,
            designator: rate.zone_name.clone(),
            process_data_variables,
        }
    }
}

impl PrescriptionMapper for DefaultPrescriptionMapper {
    fn export_prescription(
        &self,
        ctx: &MappingContext<'_>,
        model: &DataModel,
        work_item: &WorkItem,
        grid_type: u8,
        prescription: &Prescription,
    ) -> Result<IsoTask> {
        if grid_type != GRID_TYPE_1 && grid_type != GRID_TYPE_2 {
            return Err(Error::collaborator(
                COLLABORATOR,
                format!("unsupported grid type {}", grid_type),
            ));
        }

        // One task per exported operation, even when operations share a prescription
        let (task_id, _) = ctx.ids.generate_external(&ctx.config.task_id_prefix)?;
        let mut task = IsoTask::new(task_id, IsoTaskStatus::Planned);

        task.task_designator = Some(prescription.description.clone())
            .filter(|d| !d.is_empty())
            .or_else(|| work_item.description.clone());
        task.customer_id_ref = work_item
            .grower_id
            .and_then(|id| ctx.ids.resolve_external(id));
        task.farm_id_ref = work_item
            .farm_id
            .and_then(|id| ctx.ids.resolve_external(id));
        task.partfield_id_ref = work_item
            .crop_zone_id
            .or(prescription.crop_zone_id)
            .or(work_item.field_id)
            .or(prescription.field_id)
            .and_then(|id| ctx.ids.resolve_external(id));
        task.responsible_worker_id_ref = work_item
            .people_role_ids
            .iter()
            .find_map(|id| model.catalog.person_role(*id))
            .and_then(|role| ctx.ids.resolve_external(role.person_id));

        task.treatment_zones = prescription
            .rates
            .iter()
            .map(|rate| Self::export_zone(ctx, rate))
            .collect();
        let first_zone = prescription.rates.first().map(|rate| rate.zone_code);
        task.default_treatment_zone_code = first_zone;

        if let Some(grid) = &prescription.grid {
            let (filename, _) = ctx.ids.generate_external(id_prefixes::GRID)?;
            task.grid = Some(IsoGrid {
                minimum_north: grid.minimum_north,
                minimum_east: grid.minimum_east,
                cell_north_size: grid.cell_north_size,
                cell_east_size: grid.cell_east_size,
                maximum_column: grid.columns,
                maximum_row: grid.rows,
                filename,
                grid_type,
                treatment_zone_code: first_zone.filter(|_| grid_type == GRID_TYPE_2),
            });
        }

        debug!(
            "Exported prescription {} as task {}",
            prescription.id.reference_id, task.task_id
        );
        Ok(task)
    }

    fn import_prescription(
        &self,
        ctx: &MappingContext<'_>,
        task: &IsoTask,
        work_item: &WorkItem,
    ) -> Result<Prescription> {
        if !task.has_prescription() {
            return Err(Error::collaborator(
                COLLABORATOR,
                format!("task {} carries no treatment zones or grid", task.task_id),
            ));
        }

        let mut rates = Vec::new();
        for zone in &task.treatment_zones {
            for pdv in &zone.process_data_variables {
                match ctx
                    .dictionary
                    .decode_value(&pdv.process_data_ddi, pdv.process_data_value)
                {
                    Some(rate) => rates.push(PrescriptionRate {
                        zone_code: zone.code,
                        zone_name: zone.designator.clone(),
                        rate,
                    }),
                    None => debug!(
                        "Skipping zone {} value with DDI '{}'",
                        zone.code, pdv.process_data_ddi
                    ),
                }
            }
        }

        let grid = task.grid.as_ref().map(|grid| GridDefinition {
            minimum_north: grid.minimum_north,
            minimum_east: grid.minimum_east,
            cell_north_size: grid.cell_north_size,
            cell_east_size: grid.cell_east_size,
            columns: grid.maximum_column,
            rows: grid.maximum_row,
        });

        Ok(Prescription {
            id: CompoundIdentifier::new(ctx.ids.mint_internal()?),
            description: task
                .task_designator
                .clone()
                .unwrap_or_else(|| task.task_id.clone()),
            field_id: work_item.field_id,
            crop_zone_id: work_item.crop_zone_id,
            rates,
            grid,
        })
    }
}
