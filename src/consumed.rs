use crate::model::entity::Index;
use crate::pool::Pool;

/// Individuals and resources already placed into a team.
///
/// Both sets only grow: there is no way to release an entry once taken.
#[derive(Debug, Clone)]
pub struct Consumed {
    individuals: Vec<bool>,
    resources: Vec<bool>,
    n_individuals: usize,
    n_resources: usize,
}

impl Consumed {
    pub fn new(individuals: usize, resources: usize) -> Consumed {
        Consumed {
            individuals: vec![false; individuals],
            resources: vec![false; resources],
            n_individuals: 0,
            n_resources: 0,
        }
    }

    pub fn for_pool(pool: &Pool) -> Consumed {
        Consumed::new(pool.individuals().len(), pool.resources().len())
    }

    pub fn is_individual_taken(&self, index: Index) -> bool {
        self.individuals[index]
    }

    pub fn is_resource_taken(&self, index: Index) -> bool {
        self.resources[index]
    }

    pub fn take_individual(&mut self, index: Index) {
        if !std::mem::replace(&mut self.individuals[index], true) {
            self.n_individuals += 1;
        }
    }

    pub fn take_resource(&mut self, index: Index) {
        if !std::mem::replace(&mut self.resources[index], true) {
            self.n_resources += 1;
        }
    }

    pub fn individuals_taken(&self) -> usize {
        self.n_individuals
    }

    pub fn resources_taken(&self) -> usize {
        self.n_resources
    }

    pub fn individuals_left(&self) -> usize {
        self.individuals.len() - self.n_individuals
    }

    pub fn resources_left(&self) -> usize {
        self.resources.len() - self.n_resources
    }

    /// Every individual has a team.
    pub fn is_complete(&self) -> bool {
        self.individuals_left() == 0
    }
}
