//! Task / work item / logged data orchestration
//!
//! The task mapper converts document tasks to canonical work items and logged
//! data records and back. It assembles the task shell itself (identity,
//! references, status) and delegates nested collections to the
//! [collaborators](crate::app::services::collaborators) and summary values to
//! the [summary aggregator](crate::app::services::summary_aggregator).
//!
//! # Stage Isolation
//!
//! Each part of a task converts independently. When a collaborator fails, the
//! failure is logged and counted in [`MappingStats`] and that part of the
//! record stays empty while the rest of the record is still produced.
//! Identifier conflicts and configuration errors are never degraded, and
//! [`strict_stages`](crate::config::ConversionConfig::strict_stages) turns
//! every stage failure into an error.
//!
//! # Architecture
//!
//! - [`export`] - canonical records -> tasks
//! - [`import`] - tasks -> canonical records
//! - [`status`] - status translation table
//! - [`stats`] - conversion counters

use crate::Result;
use crate::app::models::canonical::ReferenceId;
use crate::app::services::collaborators::{Collaborators, MappingContext};
use tracing::{debug, warn};

pub mod export;
pub mod import;
pub mod stats;
pub mod status;

#[cfg(test)]
pub mod tests;

pub use stats::{MappingStage, MappingStats};
pub use status::{export_status, import_status};

/// Converts tasks using a set of collaborators
#[derive(Debug, Default)]
pub struct TaskMapper {
    collaborators: Collaborators,
}

impl TaskMapper {
    /// Create a task mapper with the default collaborators
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task mapper with custom collaborators
    pub fn with_collaborators(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }
}

/// Apply the stage failure policy to the result of one stage
///
/// Fatal errors, and every error in strict mode, propagate. Anything else is
/// recorded and replaced by the stage's empty result.
pub(crate) fn stage_result<T: Default>(
    ctx: &MappingContext<'_>,
    stats: &mut MappingStats,
    stage: MappingStage,
    task_id: &str,
    result: Result<T>,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) if e.is_fatal() || ctx.config.strict_stages => Err(e),
        Err(e) => {
            warn!("Stage '{}' of task {} degraded: {}", stage, task_id, e);
            stats.add_issue(stage, task_id, e.to_string());
            Ok(T::default())
        }
    }
}

/// Document id of an optional canonical reference; unresolved references are
/// counted and omitted
pub(crate) fn export_reference(
    ctx: &MappingContext<'_>,
    stats: &mut MappingStats,
    kind: &str,
    id: Option<ReferenceId>,
) -> Option<String> {
    let id = id?;
    let external = ctx.ids.resolve_external(id);
    if external.is_none() {
        debug!("No document id for {} {}", kind, id);
        stats.references_skipped += 1;
    }
    external
}

/// Reference id of an optional document reference; unresolved references are
/// counted and omitted
pub(crate) fn import_reference(
    ctx: &MappingContext<'_>,
    stats: &mut MappingStats,
    kind: &str,
    id: Option<&str>,
) -> Option<ReferenceId> {
    let id = id?;
    let internal = ctx.ids.resolve_internal(id);
    if internal.is_none() {
        debug!("Unknown {} reference {}", kind, id);
        stats.references_skipped += 1;
    }
    internal
}
