//! Worker allocations (WAN) <-> person roles

use super::{MappingContext, WorkerAllocationMapper, scope_to_stamp, stamp_to_scope};
use crate::Result;
use crate::app::models::canonical::{CompoundIdentifier, PersonRole};
use crate::app::models::document::IsoWorkerAllocation;
use tracing::debug;

/// Resolves workers and persons through the identifier map
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultWorkerAllocationMapper;

impl WorkerAllocationMapper for DefaultWorkerAllocationMapper {
    fn export_worker_allocations(
        &self,
        ctx: &MappingContext<'_>,
        roles: &[PersonRole],
    ) -> Result<Vec<IsoWorkerAllocation>> {
        let allocations = roles
            .iter()
            .filter_map(|role| {
                let Some(worker_id) = ctx.ids.resolve_external(role.person_id) else {
                    debug!("No worker id for person {}", role.person_id);
                    return None;
                };
                Some(IsoWorkerAllocation {
                    worker_id_ref: worker_id,
                    allocation_stamp: role.time_scopes.first().map(scope_to_stamp),
                })
            })
            .collect();

        Ok(allocations)
    }

    fn import_worker_allocations(
        &self,
        ctx: &MappingContext<'_>,
        allocations: &[IsoWorkerAllocation],
    ) -> Result<Vec<PersonRole>> {
        let roles = allocations
            .iter()
            .filter_map(|allocation| {
                let Some(person_id) = ctx.ids.resolve_internal(&allocation.worker_id_ref) else {
                    debug!("Unknown worker {}", allocation.worker_id_ref);
                    return None;
                };
                Some(ctx.ids.mint_internal().map(|id| PersonRole {
                    id: CompoundIdentifier::new(id),
                    person_id,
                    time_scopes: allocation
                        .allocation_stamp
                        .iter()
                        .map(stamp_to_scope)
                        .collect(),
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(roles)
    }
}
