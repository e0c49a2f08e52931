use std::collections::HashMap;

use itertools::Itertools;
use thiserror::Error;

use crate::model::entity::{Index, Individual, Number, Resource};
use crate::model::team::{FixedBinding, Team};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("Individual {0} is listed more than once")]
    DuplicateIndividual(Number),
    #[error("Resource {0} is listed more than once")]
    DuplicateResource(Number),
}

/// Catalogs of one run. Never mutated once built.
#[derive(Debug, Clone)]
pub struct Pool {
    individuals: Vec<Individual>,
    resources: Vec<Resource>,
    bindings: Vec<FixedBinding>,
    individual_lookup: HashMap<Number, Index>,
    resource_lookup: HashMap<Number, Index>,
}

impl Pool {
    pub fn new(
        individuals: Vec<Individual>,
        resources: Vec<Resource>,
        bindings: Vec<FixedBinding>,
    ) -> Result<Pool, PoolError> {
        if let Some(number) = individuals.iter().map(|i| i.number).duplicates().next() {
            return Err(PoolError::DuplicateIndividual(number));
        }
        if let Some(number) = resources.iter().map(|r| r.number).duplicates().next() {
            return Err(PoolError::DuplicateResource(number));
        }
        let individual_lookup = individuals.iter().enumerate()
            .map(|(index, individual)| (individual.number, index))
            .collect();
        let resource_lookup = resources.iter().enumerate()
            .map(|(index, resource)| (resource.number, index))
            .collect();
        Ok(Pool { individuals, resources, bindings, individual_lookup, resource_lookup })
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn bindings(&self) -> &[FixedBinding] {
        &self.bindings
    }

    pub fn individual(&self, index: Index) -> &Individual {
        &self.individuals[index]
    }

    pub fn resource(&self, index: Index) -> &Resource {
        &self.resources[index]
    }

    pub fn individual_index(&self, number: Number) -> Option<Index> {
        self.individual_lookup.get(&number).copied()
    }

    pub fn resource_index(&self, number: Number) -> Option<Index> {
        self.resource_lookup.get(&number).copied()
    }

    /// Builds a team from catalog positions, keeping member order.
    pub fn team(&self, resource: Index, members: &[Index]) -> Team {
        Team {
            resource: self.resource(resource).clone(),
            members: members.iter().map(|&index| self.individual(index).clone()).collect(),
        }
    }
}
