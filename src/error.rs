use thiserror::Error;

use crate::config::ConfigError;
use crate::io::{LoadError, PersistError};
use crate::model::entity::Number;

/// Reasons a run is aborted before an allocation exists.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AllocationError {
    #[error("Team size must be a positive integer")]
    InvalidTeamSize,
    #[error("Insufficient resources for teams of {team_size} members: {needed} needed, {available} available")]
    InsufficientCapacity { team_size: usize, needed: usize, available: usize },
    #[error("Resource {0} does not exist")]
    ResourceNotFound(Number),
    #[error("Resource {0} is already bound")]
    ResourceAlreadyBound(Number),
    #[error("Binding for resource {resource} lists {members} members, team size is {team_size}")]
    TeamSizeExceeded { resource: Number, members: usize, team_size: usize },
    #[error("Binding for resource {0} lists no members")]
    EmptyBinding(Number),
    #[error("Individual {0} does not exist")]
    MemberNotFound(Number),
    #[error("Individual {0} is already bound")]
    MemberAlreadyBound(Number),
    #[error("Individual {member} appears more than once in the binding for resource {resource}")]
    DuplicateMember { resource: Number, member: Number },
}

#[derive(Debug, Error)]
pub enum DealerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
