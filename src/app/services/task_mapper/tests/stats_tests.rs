//! Tests for mapping statistics

use crate::app::services::task_mapper::{MappingStage, MappingStats};

#[test]
fn test_mapping_stats_empty() {
    let stats = MappingStats::new();

    assert_eq!(stats.records_imported(), 0);
    assert!(!stats.has_issues());
    assert!(stats.issues.is_empty());
    assert_eq!(stats, MappingStats::default());
}

#[test]
fn test_add_issue_records_stage_and_task() {
    let mut stats = MappingStats::new();
    stats.add_issue(
        MappingStage::WorkerAllocations,
        "TSK3",
        "worker list unavailable".to_string(),
    );

    assert!(stats.has_issues());
    assert_eq!(stats.degraded_stages, 1);
    assert_eq!(
        stats.issues[0],
        "TSK3 [worker allocations]: worker list unavailable"
    );
}

#[test]
fn test_summary_line() {
    let stats = MappingStats {
        tasks_exported: 4,
        work_items_imported: 2,
        logged_data_imported: 3,
        summaries_discarded: 1,
        references_skipped: 5,
        ..MappingStats::new()
    };

    let summary = stats.summary();
    assert_eq!(stats.records_imported(), 5);
    assert!(summary.contains("4 tasks exported"));
    assert!(summary.contains("2 work items, 3 logged data imported"));
    assert!(summary.contains("1 discarded"));
    assert!(summary.contains("Skipped references: 5"));
}
