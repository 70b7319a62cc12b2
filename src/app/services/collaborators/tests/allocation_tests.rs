//! Tests for worker, guidance and comment allocation mappers

use super::*;
use crate::app::models::canonical::{
    CompoundIdentifier, DateContext, GuidanceAllocation, Note, PersonRole,
};
use crate::app::models::document::{
    IsoAllocationStamp, IsoCommentAllocation, IsoGuidanceAllocation, IsoWorkerAllocation,
};
use crate::app::services::collaborators::{
    CommentAllocationMapper, DefaultCommentAllocationMapper, DefaultGuidanceAllocationMapper,
    DefaultWorkerAllocationMapper, GuidanceAllocationMapper, WorkerAllocationMapper,
    scope_to_stamp, stamp_to_scope,
};
use chrono::{TimeDelta, TimeZone, Utc};

fn stamp_with_duration() -> IsoAllocationStamp {
    IsoAllocationStamp {
        start: Some(Utc.with_ymd_and_hms(2024, 5, 14, 8, 0, 0).unwrap()),
        stop: None,
        duration: Some(900),
    }
}

#[test]
fn test_stamp_derives_stop_from_duration() {
    let scope = stamp_to_scope(&stamp_with_duration());

    assert_eq!(
        scope.time_stamp2,
        Some(Utc.with_ymd_and_hms(2024, 5, 14, 8, 15, 0).unwrap())
    );
    assert_eq!(scope.duration, Some(TimeDelta::seconds(900)));
    assert_eq!(scope.date_context, DateContext::ActualStart);

    let back = scope_to_stamp(&scope);
    assert_eq!(back.start, stamp_with_duration().start);
    assert_eq!(back.duration, Some(900));
}

#[test]
fn test_worker_allocations_round_trip() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    let allocations = vec![
        IsoWorkerAllocation {
            worker_id_ref: "WKR1".to_string(),
            allocation_stamp: Some(stamp_with_duration()),
        },
        IsoWorkerAllocation {
            worker_id_ref: "WKR9".to_string(),
            allocation_stamp: None,
        },
    ];

    let roles = DefaultWorkerAllocationMapper
        .import_worker_allocations(&ctx, &allocations)
        .unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].person_id, 100);
    assert!(roles[0].id.reference_id < 0);
    assert_eq!(roles[0].time_scopes.len(), 1);

    let exported = DefaultWorkerAllocationMapper
        .export_worker_allocations(&ctx, &roles)
        .unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].worker_id_ref, "WKR1");
    assert_eq!(
        exported[0].allocation_stamp.as_ref().and_then(|s| s.duration),
        Some(900)
    );
}

#[test]
fn test_worker_export_skips_unknown_person() {
    let fixture = Fixture::new();
    let role = PersonRole {
        id: CompoundIdentifier::new(1),
        person_id: 999,
        time_scopes: vec![],
    };

    let exported = DefaultWorkerAllocationMapper
        .export_worker_allocations(&fixture.ctx(), &[role])
        .unwrap();
    assert!(exported.is_empty());
}

#[test]
fn test_guidance_allocations_round_trip() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    let allocations = vec![
        IsoGuidanceAllocation {
            guidance_group_id_ref: "GGP1".to_string(),
            allocation_stamp: None,
        },
        IsoGuidanceAllocation {
            guidance_group_id_ref: "GGP404".to_string(),
            allocation_stamp: None,
        },
    ];

    let imported = DefaultGuidanceAllocationMapper
        .import_guidance_allocations(&ctx, &allocations)
        .unwrap();
    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].guidance_group_id, 200);

    let exported = DefaultGuidanceAllocationMapper
        .export_guidance_allocations(&ctx, &imported)
        .unwrap();
    assert_eq!(exported, vec![allocations[0].clone()]);
}

#[test]
fn test_guidance_export_skips_unknown_group() {
    let fixture = Fixture::new();
    let allocation = GuidanceAllocation {
        id: CompoundIdentifier::new(5),
        guidance_group_id: 404,
        time_scopes: vec![],
    };

    let exported = DefaultGuidanceAllocationMapper
        .export_guidance_allocations(&fixture.ctx(), &[allocation])
        .unwrap();
    assert!(exported.is_empty());
}

#[test]
fn test_comment_allocations_round_trip() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();
    let allocations = vec![
        IsoCommentAllocation {
            coded_comment_id_ref: Some("CCT1".to_string()),
            coded_comment_list_value_id_ref: Some("CCL1".to_string()),
            free_comment_text: None,
            allocation_stamp: None,
        },
        IsoCommentAllocation {
            free_comment_text: Some("Wet headland".to_string()),
            ..Default::default()
        },
    ];

    let notes = DefaultCommentAllocationMapper
        .import_comment_allocations(&ctx, &allocations)
        .unwrap();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].coded_comment_id, Some(300));
    assert_eq!(notes[0].coded_value_id, Some(301));
    assert_eq!(notes[1].description.as_deref(), Some("Wet headland"));

    let exported = DefaultCommentAllocationMapper
        .export_comment_allocations(&ctx, &notes)
        .unwrap();
    assert_eq!(exported, allocations);
}

#[test]
fn test_comment_without_content_is_skipped() {
    let fixture = Fixture::new();
    let ctx = fixture.ctx();

    let unknown_code = IsoCommentAllocation {
        coded_comment_id_ref: Some("CCT404".to_string()),
        ..Default::default()
    };
    let notes = DefaultCommentAllocationMapper
        .import_comment_allocations(&ctx, &[unknown_code])
        .unwrap();
    assert!(notes.is_empty());

    let empty_note = Note {
        coded_comment_id: Some(999),
        ..Default::default()
    };
    let exported = DefaultCommentAllocationMapper
        .export_comment_allocations(&ctx, &[empty_note])
        .unwrap();
    assert!(exported.is_empty());
}
