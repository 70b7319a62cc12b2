//! Guidance allocations (GAN) <-> canonical guidance allocations

use super::{GuidanceAllocationMapper, MappingContext, scope_to_stamp, stamp_to_scope};
use crate::Result;
use crate::app::models::canonical::{CompoundIdentifier, GuidanceAllocation};
use crate::app::models::document::IsoGuidanceAllocation;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultGuidanceAllocationMapper;

impl GuidanceAllocationMapper for DefaultGuidanceAllocationMapper {
    fn export_guidance_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[GuidanceAllocation],
    ) -> Result<Vec<IsoGuidanceAllocation>> {
        Ok(allocations
            .iter()
            .filter_map(|allocation| {
                let Some(group_id) = ctx.ids.resolve_external(allocation.guidance_group_id)
                else {
                    debug!("No guidance group id for {}", allocation.guidance_group_id);
                    return None;
                };
                Some(IsoGuidanceAllocation {
                    guidance_group_id_ref: group_id,
                    allocation_stamp: allocation.time_scopes.first().map(scope_to_stamp),
                })
            })
            .collect())
    }

    fn import_guidance_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[IsoGuidanceAllocation],
    ) -> Result<Vec<GuidanceAllocation>> {
        allocations
            .iter()
            .filter_map(|allocation| {
                let Some(group_id) = ctx.ids.resolve_internal(&allocation.guidance_group_id_ref)
                else {
                    debug!("Unknown guidance group {}", allocation.guidance_group_id_ref);
                    return None;
                };
                Some(ctx.ids.mint_internal().map(|id| GuidanceAllocation {
                    id: CompoundIdentifier::new(id),
                    guidance_group_id: group_id,
                    time_scopes: allocation
                        .allocation_stamp
                        .iter()
                        .map(stamp_to_scope)
                        .collect(),
                }))
            })
            .collect()
    }
}
