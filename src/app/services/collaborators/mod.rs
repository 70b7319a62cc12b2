//! Peer sub-mappers for the nested content of a task
//!
//! The task mapper flattens and rebuilds the task shell itself and hands each
//! nested collection to a collaborator: worker allocations, guidance
//! allocations, comment allocations, prescriptions and time logs. It depends
//! only on the traits defined here, so any collaborator can be replaced
//! through [`Collaborators`].
//!
//! Every collaborator takes an ordered sequence and returns an ordered
//! sequence. Entries whose references do not resolve are left out rather than
//! failing the whole collection.

use crate::app::models::canonical::{
    CompoundIdentifier, DataModel, DateContext, GuidanceAllocation, Note, OperationData,
    PersonRole, Prescription, ReferenceId, TimeScope, UniqueId, WorkItem,
};
use crate::app::models::document::{
    IsoAllocationStamp, IsoCommentAllocation, IsoGuidanceAllocation, IsoTask, IsoTimeLog,
    IsoWorkerAllocation,
};
use crate::app::services::identifier_map::IdentifierMap;
use crate::app::services::quantity_dictionary::QuantityDictionary;
use crate::Result;
use crate::config::ConversionConfig;
use crate::constants::is_valid_document_id;
use chrono::TimeDelta;
use std::fmt;
use std::path::Path;

pub mod comment_allocation;
pub mod guidance_allocation;
pub mod prescription;
pub mod time_log;
pub mod worker_allocation;

#[cfg(test)]
pub mod tests;

pub use comment_allocation::DefaultCommentAllocationMapper;
pub use guidance_allocation::DefaultGuidanceAllocationMapper;
pub use prescription::DefaultPrescriptionMapper;
pub use time_log::DefaultTimeLogMapper;
pub use worker_allocation::DefaultWorkerAllocationMapper;

/// Session services shared by every mapping call
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    pub ids: &'a IdentifierMap,
    pub dictionary: &'a QuantityDictionary,
    pub config: &'a ConversionConfig,
}

impl<'a> MappingContext<'a> {
    pub fn new(
        ids: &'a IdentifierMap,
        dictionary: &'a QuantityDictionary,
        config: &'a ConversionConfig,
    ) -> Self {
        Self {
            ids,
            dictionary,
            config,
        }
    }

    /// Document id for an entity being exported
    ///
    /// Uses the id already bound to `reference_id`, then `candidate` when it is
    /// a well-formed id for `prefix`, and otherwise the next generated id.
    pub fn document_id(
        &self,
        reference_id: ReferenceId,
        candidate: Option<&str>,
        prefix: &str,
    ) -> Result<String> {
        if let Some(existing) = self.ids.resolve_external(reference_id) {
            return Ok(existing);
        }

        match candidate.filter(|id| is_valid_document_id(id, prefix)) {
            Some(id) => {
                self.ids.register(id, reference_id)?;
                Ok(id.to_string())
            }
            None => Ok(self.ids.assign_external(prefix, reference_id)),
        }
    }

    /// Document id for an exported entity, reusing its ISO unique id
    pub fn export_id(&self, id: &CompoundIdentifier, prefix: &str) -> Result<String> {
        let iso_id = id.find_unique_id(&self.config.iso_id_source);
        self.document_id(id.reference_id, iso_id, prefix)
    }

    /// Identifier for an imported entity
    ///
    /// Mints a reference id, registers `external` against it and records
    /// `external` as a unique id from the ISO source.
    pub fn import_id(&self, external: &str) -> Result<CompoundIdentifier> {
        let reference_id = self.ids.mint_internal()?;
        self.ids.register(external, reference_id)?;

        Ok(CompoundIdentifier {
            reference_id,
            unique_ids: vec![UniqueId {
                id: external.to_string(),
                source: self.config.iso_id_source.clone(),
            }],
        })
    }
}

// =============================================================================
// Collaborator Contracts
// =============================================================================

/// Worker allocations (WAN) <-> person roles
pub trait WorkerAllocationMapper {
    fn export_worker_allocations(
        &self,
        ctx: &MappingContext<'_>,
        roles: &[PersonRole],
    ) -> Result<Vec<IsoWorkerAllocation>>;

    fn import_worker_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[IsoWorkerAllocation],
    ) -> Result<Vec<PersonRole>>;
}

/// Guidance allocations (GAN) <-> canonical guidance allocations
pub trait GuidanceAllocationMapper {
    fn export_guidance_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[GuidanceAllocation],
    ) -> Result<Vec<IsoGuidanceAllocation>>;

    fn import_guidance_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[IsoGuidanceAllocation],
    ) -> Result<Vec<GuidanceAllocation>>;
}

/// Comment allocations (CAN) <-> notes
pub trait CommentAllocationMapper {
    fn export_comment_allocations(
        &self,
        ctx: &MappingContext<'_>,
        notes: &[Note],
    ) -> Result<Vec<IsoCommentAllocation>>;

    fn import_comment_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[IsoCommentAllocation],
    ) -> Result<Vec<Note>>;
}

/// Prescribed tasks <-> catalog prescriptions
pub trait PrescriptionMapper {
    /// Build the task carrying `prescription` for one operation of `work_item`
    fn export_prescription(
        &self,
        ctx: &MappingContext<'_>,
        model: &DataModel,
        work_item: &WorkItem,
        grid_type: u8,
        prescription: &Prescription,
    ) -> Result<IsoTask>;

    /// Build a catalog prescription from the treatment zones and grid of a task
    fn import_prescription(
        &self,
        ctx: &MappingContext<'_>,
        task: &IsoTask,
        work_item: &WorkItem,
    ) -> Result<Prescription>;
}

/// Time log references (TLG) <-> operation data
pub trait TimeLogMapper {
    fn export_time_logs(
        &self,
        ctx: &MappingContext<'_>,
        operation_data: &[OperationData],
        storage_path: &Path,
    ) -> Result<Vec<IsoTimeLog>>;

    fn import_time_logs(
        &self,
        ctx: &MappingContext<'_>,
        time_logs: &[IsoTimeLog],
    ) -> Result<Vec<OperationData>>;
}

// =============================================================================
// Collaborator Set
// =============================================================================

/// The collaborators used by one task mapper
pub struct Collaborators {
    pub workers: Box<dyn WorkerAllocationMapper + Send + Sync>,
    pub guidance: Box<dyn GuidanceAllocationMapper + Send + Sync>,
    pub comments: Box<dyn CommentAllocationMapper + Send + Sync>,
    pub prescriptions: Box<dyn PrescriptionMapper + Send + Sync>,
    pub time_logs: Box<dyn TimeLogMapper + Send + Sync>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Self {
            workers: Box::new(DefaultWorkerAllocationMapper),
            guidance: Box::new(DefaultGuidanceAllocationMapper),
            comments: Box::new(DefaultCommentAllocationMapper),
            prescriptions: Box::new(DefaultPrescriptionMapper),
            time_logs: Box::new(DefaultTimeLogMapper),
        }
    }
}

impl fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

impl Collaborators {
    pub fn with_workers(
        mut self,
        mapper: impl WorkerAllocationMapper + Send + Sync + 'static,
    ) -> Self {
        self.workers = Box::new(mapper);
        self
    }

    pub fn with_guidance(
        mut self,
        mapper: impl GuidanceAllocationMapper + Send + Sync + 'static,
    ) -> Self {
        self.guidance = Box::new(mapper);
        self
    }

    pub fn with_comments(
        mut self,
        mapper: impl CommentAllocationMapper + Send + Sync + 'static,
    ) -> Self {
        self.comments = Box::new(mapper);
        self
    }

    pub fn with_prescriptions(
        mut self,
        mapper: impl PrescriptionMapper + Send + Sync + 'static,
    ) -> Self {
        self.prescriptions = Box::new(mapper);
        self
    }

    pub fn with_time_logs(mut self, mapper: impl TimeLogMapper + Send + Sync + 'static) -> Self {
        self.time_logs = Box::new(mapper);
        self
    }
}

// =============================================================================
// Allocation Stamps
// =============================================================================

/// Time scope of an allocation stamp; a missing stop is derived from the
/// duration and vice versa
pub fn stamp_to_scope(stamp: &IsoAllocationStamp) -> TimeScope {
    let derived_stop = match (stamp.start, stamp.duration) {
        (Some(start), Some(seconds)) => {
            TimeDelta::try_seconds(seconds).and_then(|d| start.checked_add_signed(d))
        }
        _ => None,
    };
    let stop = stamp.stop.or(derived_stop);

    let duration = match (stamp.duration, stamp.start, stop) {
        (Some(seconds), _, _) => TimeDelta::try_seconds(seconds),
        (None, Some(start), Some(stop)) => Some(stop - start),
        _ => None,
    };

    TimeScope {
        time_stamp1: stamp.start,
        time_stamp2: stop,
        duration,
        date_context: DateContext::ActualStart,
    }
}

/// Allocation stamp of a time scope
pub fn scope_to_stamp(scope: &TimeScope) -> IsoAllocationStamp {
    IsoAllocationStamp {
        start: scope.time_stamp1,
        stop: scope.time_stamp2,
        duration: scope.duration.map(|d| d.num_seconds()),
    }
}
