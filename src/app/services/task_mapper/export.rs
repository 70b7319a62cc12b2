//! Canonical records -> document tasks

use super::status::export_status;
use super::{MappingStage, MappingStats, TaskMapper, export_reference, stage_result};
use crate::Result;
use crate::app::models::canonical::{
    DataModel, GuidanceAllocation, LoggedData, PersonRole, WorkItem,
};
use crate::app::models::document::{IsoTask, IsoTaskStatus};
use crate::app::services::collaborators::MappingContext;
use crate::app::services::summary_aggregator::export_summary;
use crate::constants::logged_data_designator;
use tracing::{debug, info};

impl TaskMapper {
    /// Export work items as prescribed tasks
    ///
    /// Each operation of a work item whose prescription is present in the
    /// catalog becomes one task carrying the work item's latest status; work
    /// items without such operations produce nothing.
    pub fn export_work_items(
        &self,
        ctx: &MappingContext<'_>,
        model: &DataModel,
        work_items: &[WorkItem],
        stats: &mut MappingStats,
    ) -> Result<Vec<IsoTask>> {
        let mut tasks = Vec::new();

        for work_item in work_items {
            for operation_id in &work_item.work_item_operation_ids {
                let Some(operation) = model.documents.work_item_operation(*operation_id) else {
                    debug!("Work item operation {} not found", operation_id);
                    stats.references_skipped += 1;
                    continue;
                };
                let Some(prescription_id) = operation.prescription_id else {
                    continue;
                };
                let Some(prescription) = model.catalog.prescription(prescription_id) else {
                    debug!("Prescription {} not found", prescription_id);
                    stats.references_skipped += 1;
                    continue;
                };

                let label = format!("work item {}", work_item.id.reference_id);
                let exported = self
                    .collaborators
                    .prescriptions
                    .export_prescription(
                        ctx,
                        model,
                        work_item,
                        ctx.config.grid_type,
                        prescription,
                    )
                    .map(Some);
                if let Some(mut task) =
                    stage_result(ctx, stats, MappingStage::Prescription, &label, exported)?
                {
                    if let Some(update) = work_item.status_updates.last() {
                        task.task_status = export_status(update.status);
                    }
                    tasks.push(task);
                }
            }
        }

        stats.tasks_exported += tasks.len();
        info!(
            "Exported {} prescribed tasks from {} work items",
            tasks.len(),
            work_items.len()
        );
        Ok(tasks)
    }

    /// Export logged data records as completed tasks, one task per record
    pub fn export_logged_data(
        &self,
        ctx: &MappingContext<'_>,
        model: &DataModel,
        logged_data: &[LoggedData],
        stats: &mut MappingStats,
    ) -> Result<Vec<IsoTask>> {
        let tasks = logged_data
            .iter()
            .map(|record| self.export_logged_record(ctx, model, record, stats))
            .collect::<Result<Vec<_>>>()?;

        info!("Exported {} logged data tasks", tasks.len());
        Ok(tasks)
    }

    fn export_logged_record(
        &self,
        ctx: &MappingContext<'_>,
        model: &DataModel,
        record: &LoggedData,
        stats: &mut MappingStats,
    ) -> Result<IsoTask> {
        let task_id = ctx.export_id(&record.id, &ctx.config.task_id_prefix)?;
        let mut task = IsoTask::new(task_id, IsoTaskStatus::Completed);
        debug!(
            "Exporting logged data {} as {}",
            record.id.reference_id, task.task_id
        );

        task.task_designator = Some(
            record
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| logged_data_designator(record.id.reference_id)),
        );

        // References
        task.customer_id_ref = export_reference(ctx, stats, "grower", record.grower_id);
        task.farm_id_ref = export_reference(ctx, stats, "farm", record.farm_id);
        task.partfield_id_ref = export_reference(
            ctx,
            stats,
            "partfield",
            record.crop_zone_id.or(record.field_id),
        );

        // Time logs
        if !record.operation_data.is_empty() {
            let exported = self.collaborators.time_logs.export_time_logs(
                ctx,
                &record.operation_data,
                &ctx.config.task_data_path,
            );
            task.time_logs =
                stage_result(ctx, stats, MappingStage::TimeLogs, &task.task_id, exported)?;
        }

        // Summary
        if let Some(summary_id) = record.summary_id {
            match model.documents.summary(summary_id) {
                Some(summary) => {
                    task.times = export_summary(summary, ctx.dictionary);
                    stats.summaries_exported += 1;
                }
                None => {
                    debug!("Summary {} not found", summary_id);
                    stats.references_skipped += 1;
                }
            }
        }

        // Comments
        if !record.notes.is_empty() {
            let exported = self
                .collaborators
                .comments
                .export_comment_allocations(ctx, &record.notes);
            task.comment_allocations =
                stage_result(ctx, stats, MappingStage::Comments, &task.task_id, exported)?;
        }

        // Worker allocations
        if !record.person_role_ids.is_empty() {
            let roles: Vec<PersonRole> = record
                .person_role_ids
                .iter()
                .filter_map(|id| model.catalog.person_role(*id))
                .cloned()
                .collect();
            let exported = self
                .collaborators
                .workers
                .export_worker_allocations(ctx, &roles);
            task.worker_allocations = stage_result(
                ctx,
                stats,
                MappingStage::WorkerAllocations,
                &task.task_id,
                exported,
            )?;
        }

        // Guidance allocations
        if !record.guidance_allocation_ids.is_empty() {
            let allocations: Vec<GuidanceAllocation> = record
                .guidance_allocation_ids
                .iter()
                .filter_map(|id| model.documents.guidance_allocation(*id))
                .cloned()
                .collect();
            let exported = self
                .collaborators
                .guidance
                .export_guidance_allocations(ctx, &allocations);
            task.guidance_allocations = stage_result(
                ctx,
                stats,
                MappingStage::GuidanceAllocations,
                &task.task_id,
                exported,
            )?;
        }

        stats.tasks_exported += 1;
        Ok(task)
    }
}
