use tracing::debug;

use crate::audit::{AuditEvent, AuditTrail};
use crate::consumed::Consumed;
use crate::error::AllocationError;
use crate::model::entity::Index;
use crate::model::team::{FixedBinding, Team};
use crate::pool::Pool;

/// Teams taken from the fixed bindings, and what they used up.
#[derive(Debug, Clone)]
pub struct Committed {
    pub teams: Vec<Team>,
    pub consumed: Consumed,
}

/// Checks capacity and commits every fixed binding of `pool`, in order.
///
/// The first failing binding aborts the whole run.
pub fn validate(pool: &Pool, team_size: usize, audit: &mut AuditTrail) -> Result<Committed, AllocationError> {
    if team_size == 0 {
        return Err(AllocationError::InvalidTeamSize);
    }
    ensure_capacity(pool.individuals().len(), pool.resources().len(), team_size)?;

    let mut consumed = Consumed::for_pool(pool);
    let mut teams = Vec::with_capacity(pool.bindings().len());
    for binding in pool.bindings() {
        teams.push(commit(pool, binding, team_size, &mut consumed, audit)?);
    }

    // short bindings can leave more individuals than the unused resources can take
    ensure_capacity(consumed.individuals_left(), consumed.resources_left(), team_size)?;
    Ok(Committed { teams, consumed })
}

pub(crate) fn ensure_capacity(individuals: usize, resources: usize, team_size: usize) -> Result<(), AllocationError> {
    let needed = individuals.div_ceil(team_size);
    if needed > resources {
        return Err(AllocationError::InsufficientCapacity { team_size, needed, available: resources });
    }
    Ok(())
}

fn commit(
    pool: &Pool,
    binding: &FixedBinding,
    team_size: usize,
    consumed: &mut Consumed,
    audit: &mut AuditTrail,
) -> Result<Team, AllocationError> {
    let resource = pool.resource_index(binding.resource)
        .ok_or(AllocationError::ResourceNotFound(binding.resource))?;
    if consumed.is_resource_taken(resource) {
        return Err(AllocationError::ResourceAlreadyBound(binding.resource));
    }
    if binding.members.len() > team_size {
        return Err(AllocationError::TeamSizeExceeded {
            resource: binding.resource,
            members: binding.members.len(),
            team_size,
        });
    }
    if binding.members.is_empty() {
        return Err(AllocationError::EmptyBinding(binding.resource));
    }

    let mut members: Vec<Index> = Vec::with_capacity(binding.members.len());
    for &number in &binding.members {
        let index = pool.individual_index(number)
            .ok_or(AllocationError::MemberNotFound(number))?;
        if consumed.is_individual_taken(index) {
            return Err(AllocationError::MemberAlreadyBound(number));
        }
        if members.contains(&index) {
            return Err(AllocationError::DuplicateMember { resource: binding.resource, member: number });
        }
        members.push(index);
    }

    consumed.take_resource(resource);
    audit.record(AuditEvent::BindingResource(resource));
    for (slot, &index) in members.iter().enumerate() {
        consumed.take_individual(index);
        audit.record(AuditEvent::BindingMember { slot, index });
    }
    audit.record(AuditEvent::TeamClosed);

    debug!(resource = binding.resource, members = ?binding.members, "committed fixed binding");
    Ok(pool.team(resource, &members))
}
