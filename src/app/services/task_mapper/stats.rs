//! Conversion statistics for task mapping
//!
//! Degraded stages do not fail a conversion, so they are counted here and
//! reported at the end of a session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Collaborator-backed part of a task conversion that can degrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingStage {
    TimeLogs,
    Comments,
    WorkerAllocations,
    GuidanceAllocations,
    Prescription,
}

impl MappingStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TimeLogs => "time logs",
            Self::Comments => "comments",
            Self::WorkerAllocations => "worker allocations",
            Self::GuidanceAllocations => "guidance allocations",
            Self::Prescription => "prescription",
        }
    }
}

impl fmt::Display for MappingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters for one conversion session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingStats {
    /// Tasks written on export
    pub tasks_exported: usize,
    /// Work items built on import
    pub work_items_imported: usize,
    /// Logged data records built on import
    pub logged_data_imported: usize,
    /// Summaries written as time entries
    pub summaries_exported: usize,
    /// Summaries built from time entries
    pub summaries_imported: usize,
    /// Summary batches dropped because a value could not be decoded
    pub summaries_discarded: usize,
    /// Optional references that did not resolve
    pub references_skipped: usize,
    /// Stages that failed and produced an empty result
    pub degraded_stages: usize,
    /// Messages describing degraded stages
    pub issues: Vec<String>,
}

impl MappingStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            tasks_exported: 0,
            work_items_imported: 0,
            logged_data_imported: 0,
            summaries_exported: 0,
            summaries_imported: 0,
            summaries_discarded: 0,
            references_skipped: 0,
            degraded_stages: 0,
            issues: Vec::new(),
        }
    }

    /// Record a degraded stage
    pub fn add_issue(&mut self, stage: MappingStage, task_id: &str, message: String) {
        self.degraded_stages += 1;
        self.issues.push(format!("{} [{}]: {}", task_id, stage, message));
    }

    /// Total canonical records built on import
    pub fn records_imported(&self) -> usize {
        self.work_items_imported + self.logged_data_imported
    }

    /// Whether any stage degraded
    pub fn has_issues(&self) -> bool {
        self.degraded_stages > 0
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Mapping Summary: {} tasks exported | {} work items, {} logged data imported | \
             Summaries: {} exported, {} imported, {} discarded | \
             Skipped references: {} | Degraded stages: {}",
            self.tasks_exported,
            self.work_items_imported,
            self.logged_data_imported,
            self.summaries_exported,
            self.summaries_imported,
            self.summaries_discarded,
            self.references_skipped,
            self.degraded_stages
        )
    }
}

impl Default for MappingStats {
    fn default() -> Self {
        Self::new()
    }
}
