//! Task status translation

use crate::app::models::canonical::WorkStatus;
use crate::app::models::document::IsoTaskStatus;

/// Canonical status of an imported task
///
/// Planned, template and unrecognized codes all import as scheduled work.
pub fn import_status(status: IsoTaskStatus) -> WorkStatus {
    match status {
        IsoTaskStatus::Canceled => WorkStatus::Cancelled,
        IsoTaskStatus::Completed => WorkStatus::Completed,
        IsoTaskStatus::Running => WorkStatus::InProgress,
        IsoTaskStatus::Paused => WorkStatus::Paused,
        IsoTaskStatus::Planned | IsoTaskStatus::Template | IsoTaskStatus::Unknown(_) => {
            WorkStatus::Scheduled
        }
    }
}

/// Document status for a canonical status
pub fn export_status(status: WorkStatus) -> IsoTaskStatus {
    match status {
        WorkStatus::Scheduled => IsoTaskStatus::Planned,
        WorkStatus::InProgress => IsoTaskStatus::Running,
        WorkStatus::Paused => IsoTaskStatus::Paused,
        WorkStatus::Completed => IsoTaskStatus::Completed,
        WorkStatus::Cancelled => IsoTaskStatus::Canceled,
    }
}
