//! Comment allocations (CAN) <-> notes

use super::{CommentAllocationMapper, MappingContext, scope_to_stamp, stamp_to_scope};
use crate::Result;
use crate::app::models::canonical::Note;
use crate::app::models::document::IsoCommentAllocation;
use tracing::debug;

/// Maps free text directly and coded comments through the identifier map
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCommentAllocationMapper;

impl CommentAllocationMapper for DefaultCommentAllocationMapper {
    fn export_comment_allocations(
        &self,
        ctx: &MappingContext<'_>,
        notes: &[Note],
    ) -> Result<Vec<IsoCommentAllocation>> {
        let mut allocations = Vec::with_capacity(notes.len());

        for note in notes {
            let coded_comment = note.coded_comment_id.and_then(|id| ctx.ids.resolve_external(id));
            let coded_value = note.coded_value_id.and_then(|id| ctx.ids.resolve_external(id));

            // A coded comment and its list value only make sense together
            let (coded_comment, coded_value) = match coded_comment {
                Some(comment) => (Some(comment), coded_value),
                None => (None, None),
            };

            if coded_comment.is_none() && note.description.is_none() {
                debug!("Skipping note without text or resolvable coded comment");
                continue;
            }

            allocations.push(IsoCommentAllocation {
                coded_comment_id_ref: coded_comment,
                coded_comment_list_value_id_ref: coded_value,
                free_comment_text: note.description.clone(),
                allocation_stamp: note.time_stamp.as_ref().map(scope_to_stamp),
            });
        }

        Ok(allocations)
    }

    fn import_comment_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[IsoCommentAllocation],
    ) -> Result<Vec<Note>> {
        let mut notes = Vec::with_capacity(allocations.len());

        for allocation in allocations {
            let coded_comment_id = allocation
                .coded_comment_id_ref
                .as_deref()
                .and_then(|id| ctx.ids.resolve_internal(id));
            let coded_value_id = allocation
                .coded_comment_list_value_id_ref
                .as_deref()
                .and_then(|id| ctx.ids.resolve_internal(id));

            if coded_comment_id.is_none() && allocation.free_comment_text.is_none() {
                debug!("Skipping comment allocation without text or known coded comment");
                continue;
            }

            notes.push(Note {
                description: allocation.free_comment_text.clone(),
                coded_comment_id,
                coded_value_id: coded_comment_id.and(coded_value_id),
                time_stamp: allocation.allocation_stamp.as_ref().map(stamp_to_scope),
            });
        }

        Ok(notes)
    }
}
