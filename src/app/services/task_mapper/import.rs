//! Document tasks -> canonical records
//!
//! Importing mutates the data model: person roles and prescriptions are added
//! to the catalog; guidance allocations, work item operations and summaries
//! are added to the documents. The returned records reference them by id.

use super::status::import_status;
use super::{MappingStage, MappingStats, TaskMapper, import_reference, stage_result};
use crate::Result;
use crate::app::models::canonical::{
    CompoundIdentifier, DataModel, LoggedData, PersonRole, ReferenceId, StatusUpdate, Summary,
    WorkItem, WorkItemOperation,
};
use crate::app::models::document::IsoTask;
use crate::app::services::collaborators::MappingContext;
use crate::app::services::summary_aggregator::{import_summary_data, is_summary_candidate};
use tracing::{debug, info, warn};

/// Field and crop zone ids of an imported partfield reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Location {
    field_id: Option<ReferenceId>,
    crop_zone_id: Option<ReferenceId>,
}

impl TaskMapper {
    /// Import prescribed or planned tasks as work items
    pub fn import_work_items(
        &self,
        ctx: &MappingContext<'_>,
        model: &mut DataModel,
        tasks: &[IsoTask],
        stats: &mut MappingStats,
    ) -> Result<Vec<WorkItem>> {
        let work_items = tasks
            .iter()
            .map(|task| self.import_work_item(ctx, model, task, stats))
            .collect::<Result<Vec<_>>>()?;

        info!("Imported {} work items", work_items.len());
        Ok(work_items)
    }

    /// Import logged tasks as logged data records
    pub fn import_logged_data(
        &self,
        ctx: &MappingContext<'_>,
        model: &mut DataModel,
        tasks: &[IsoTask],
        stats: &mut MappingStats,
    ) -> Result<Vec<LoggedData>> {
        let records = tasks
            .iter()
            .map(|task| self.import_logged_record(ctx, model, task, stats))
            .collect::<Result<Vec<_>>>()?;

        info!("Imported {} logged data records", records.len());
        Ok(records)
    }

    fn import_work_item(
        &self,
        ctx: &MappingContext<'_>,
        model: &mut DataModel,
        task: &IsoTask,
        stats: &mut MappingStats,
    ) -> Result<WorkItem> {
        let mut work_item = WorkItem {
            id: ctx.import_id(&task.task_id)?,
            description: task.task_designator.clone(),
            ..Default::default()
        };
        debug!(
            "Importing task {} as work item {}",
            task.task_id, work_item.id.reference_id
        );

        // References
        work_item.grower_id =
            import_reference(ctx, stats, "customer", task.customer_id_ref.as_deref());
        work_item.farm_id = import_reference(ctx, stats, "farm", task.farm_id_ref.as_deref());
        let location = import_location(ctx, model, stats, task);
        work_item.field_id = location.field_id;
        work_item.crop_zone_id = location.crop_zone_id;

        // Status
        work_item.status_updates = vec![StatusUpdate {
            status: import_status(task.task_status),
            time_stamp: None,
        }];

        // Responsible worker and worker allocations
        let roles = self.import_roles(ctx, stats, task)?;
        work_item
            .people_role_ids
            .extend(roles.iter().map(|role| role.id.reference_id));
        model.catalog.person_roles.extend(roles);

        // Guidance allocations
        if !task.guidance_allocations.is_empty() {
            let imported = self
                .collaborators
                .guidance
                .import_guidance_allocations(ctx, &task.guidance_allocations);
            let allocations = stage_result(
                ctx,
                stats,
                MappingStage::GuidanceAllocations,
                &task.task_id,
                imported,
            )?;
            work_item
                .guidance_allocation_ids
                .extend(allocations.iter().map(|a| a.id.reference_id));
            model.documents.guidance_allocations.extend(allocations);
        }

        // Prescription
        if task.has_prescription() {
            let imported = self
                .collaborators
                .prescriptions
                .import_prescription(ctx, task, &work_item)
                .map(Some);
            if let Some(prescription) =
                stage_result(ctx, stats, MappingStage::Prescription, &task.task_id, imported)?
            {
                let operation = WorkItemOperation {
                    id: CompoundIdentifier::new(ctx.ids.mint_internal()?),
                    prescription_id: Some(prescription.id.reference_id),
                };
                work_item
                    .work_item_operation_ids
                    .push(operation.id.reference_id);
                model.documents.work_item_operations.push(operation);
                model.catalog.prescriptions.push(prescription);
            }
        }

        stats.work_items_imported += 1;
        Ok(work_item)
    }

    fn import_logged_record(
        &self,
        ctx: &MappingContext<'_>,
        model: &mut DataModel,
        task: &IsoTask,
        stats: &mut MappingStats,
    ) -> Result<LoggedData> {
        let mut record = LoggedData {
            id: ctx.import_id(&task.task_id)?,
            description: task.task_designator.clone(),
            ..Default::default()
        };
        debug!(
            "Importing task {} as logged data {}",
            task.task_id, record.id.reference_id
        );

        // References
        record.grower_id =
            import_reference(ctx, stats, "customer", task.customer_id_ref.as_deref());
        record.farm_id = import_reference(ctx, stats, "farm", task.farm_id_ref.as_deref());
        let location = import_location(ctx, model, stats, task);
        record.field_id = location.field_id;
        record.crop_zone_id = location.crop_zone_id;

        // Responsible worker and worker allocations
        let roles = self.import_roles(ctx, stats, task)?;
        record
            .person_role_ids
            .extend(roles.iter().map(|role| role.id.reference_id));
        model.catalog.person_roles.extend(roles);

        // Guidance allocations
        if !task.guidance_allocations.is_empty() {
            let imported = self
                .collaborators
                .guidance
                .import_guidance_allocations(ctx, &task.guidance_allocations);
            let allocations = stage_result(
                ctx,
                stats,
                MappingStage::GuidanceAllocations,
                &task.task_id,
                imported,
            )?;
            record
                .guidance_allocation_ids
                .extend(allocations.iter().map(|a| a.id.reference_id));
            model.documents.guidance_allocations.extend(allocations);
        }

        // Comments
        if !task.comment_allocations.is_empty() {
            let imported = self
                .collaborators
                .comments
                .import_comment_allocations(ctx, &task.comment_allocations);
            record.notes =
                stage_result(ctx, stats, MappingStage::Comments, &task.task_id, imported)?;
        }

        // Summary
        if task.times.iter().any(is_summary_candidate) {
            match import_summary_data(&task.times, ctx.dictionary) {
                Some(summary_data) => {
                    let summary = Summary {
                        id: CompoundIdentifier::new(ctx.ids.mint_internal()?),
                        summary_data,
                    };
                    record.summary_id = Some(summary.id.reference_id);
                    model.documents.summaries.push(summary);
                    stats.summaries_imported += 1;
                }
                None => {
                    warn!("Summary of task {} discarded", task.task_id);
                    stats.summaries_discarded += 1;
                }
            }
        }

        // Time logs
        if !task.time_logs.is_empty() {
            let imported = self
                .collaborators
                .time_logs
                .import_time_logs(ctx, &task.time_logs);
            record.operation_data =
                stage_result(ctx, stats, MappingStage::TimeLogs, &task.task_id, imported)?;
        }

        stats.logged_data_imported += 1;
        Ok(record)
    }

    /// Person roles for the responsible worker and the worker allocations of a
    /// task, in that order
    fn import_roles(
        &self,
        ctx: &MappingContext<'_>,
        stats: &mut MappingStats,
        task: &IsoTask,
    ) -> Result<Vec<PersonRole>> {
        let mut roles = Vec::new();

        if let Some(person_id) = import_reference(
            ctx,
            stats,
            "responsible worker",
            task.responsible_worker_id_ref.as_deref(),
        ) {
            roles.push(PersonRole {
                id: CompoundIdentifier::new(ctx.ids.mint_internal()?),
                person_id,
                time_scopes: Vec::new(),
            });
        }

        if !task.worker_allocations.is_empty() {
            let imported = self
                .collaborators
                .workers
                .import_worker_allocations(ctx, &task.worker_allocations);
            roles.extend(stage_result(
                ctx,
                stats,
                MappingStage::WorkerAllocations,
                &task.task_id,
                imported,
            )?);
        }

        Ok(roles)
    }
}

/// Resolve the partfield reference, preferring a crop zone over a field
fn import_location(
    ctx: &MappingContext<'_>,
    model: &DataModel,
    stats: &mut MappingStats,
    task: &IsoTask,
) -> Location {
    match import_reference(ctx, stats, "partfield", task.partfield_id_ref.as_deref()) {
        Some(id) if model.catalog.has_crop_zone(id) => Location {
            field_id: None,
            crop_zone_id: Some(id),
        },
        Some(id) => Location {
            field_id: Some(id),
            crop_zone_id: None,
        },
        None => Location::default(),
    }
}
