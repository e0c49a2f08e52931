use rand::Rng;

use crate::audit::{AuditEvent, AuditTrail, Slot};
use crate::consumed::Consumed;
use crate::error::AllocationError;
use crate::model::entity::Index;
use crate::model::team::Team;
use crate::pool::Pool;
use crate::validate::ensure_capacity;

/// Fills the remaining teams by rejection sampling.
///
/// Every draw is taken uniformly from the full catalog range; a draw that hits
/// an entry already consumed (or already in the team being built) is recorded
/// as invalid and redrawn. Conditioned on acceptance this is a uniform draw
/// over the entries still free.
pub struct Sampler<'a, R: Rng + ?Sized> {
    pool: &'a Pool,
    team_size: usize,
    consumed: &'a mut Consumed,
    audit: &'a mut AuditTrail,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> Sampler<'a, R> {
    pub fn new(
        pool: &'a Pool,
        team_size: usize,
        consumed: &'a mut Consumed,
        audit: &'a mut AuditTrail,
        rng: &'a mut R,
    ) -> Sampler<'a, R> {
        Sampler { pool, team_size, consumed, audit, rng }
    }

    /// Draws teams until every individual is placed.
    ///
    /// Fails only when the free resources cannot hold the free individuals,
    /// which would otherwise leave the resource draw without a valid outcome.
    pub fn run(mut self) -> Result<Vec<Team>, AllocationError> {
        if self.team_size == 0 {
            return Err(AllocationError::InvalidTeamSize);
        }
        ensure_capacity(self.consumed.individuals_left(), self.consumed.resources_left(), self.team_size)?;

        let mut teams = Vec::with_capacity(self.consumed.individuals_left().div_ceil(self.team_size));
        while !self.consumed.is_complete() {
            teams.push(self.next_team());
        }
        Ok(teams)
    }

    fn next_team(&mut self) -> Team {
        let resource = self.draw_resource();
        let mut members: Vec<Index> = Vec::with_capacity(self.team_size);
        for slot in 0..self.team_size {
            // the last team may come up short
            if self.consumed.is_complete() {
                break;
            }
            let index = self.draw_member(slot, &members);
            self.consumed.take_individual(index);
            members.push(index);
        }
        self.audit.record(AuditEvent::TeamClosed);
        self.pool.team(resource, &members)
    }

    fn draw_resource(&mut self) -> Index {
        let range = 0..self.pool.resources().len();
        loop {
            let index = self.rng.gen_range(range.clone());
            let valid = !self.consumed.is_resource_taken(index);
            self.audit.record(AuditEvent::ResourceDraw { index, valid });
            if valid {
                self.consumed.take_resource(index);
                return index;
            }
        }
    }

    fn draw_member(&mut self, slot: Slot, chosen: &[Index]) -> Index {
        let range = 0..self.pool.individuals().len();
        loop {
            let index = self.rng.gen_range(range.clone());
            let valid = !self.consumed.is_individual_taken(index) && !chosen.contains(&index);
            self.audit.record(AuditEvent::MemberDraw { slot, index, valid });
            if valid {
                return index;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::model::entity::{Individual, Resource};

    fn pool(individuals: u32, resources: u32) -> Pool {
        Pool::new(
            (1..=individuals).map(|n| Individual::new(n, format!("Individual {n}"))).collect(),
            (1..=resources).map(|n| Resource::new(n * 10, format!("Resource {n}"))).collect(),
            vec![],
        ).unwrap()
    }

    fn sample(pool: &Pool, team_size: usize, seed: u64) -> (Vec<Team>, AuditTrail) {
        let mut consumed = Consumed::for_pool(pool);
        let mut audit = AuditTrail::new();
        let mut rng = SmallRng::seed_from_u64(seed);
        let teams = Sampler::new(pool, team_size, &mut consumed, &mut audit, &mut rng).run().unwrap();
        assert!(consumed.is_complete());
        (teams, audit)
    }

    #[test]
    fn four_individuals_in_pairs_use_both_resources() {
        let pool = pool(4, 2);
        let (teams, _) = sample(&pool, 2, 7);
        assert_eq!(teams.len(), 2);
        assert!(teams.iter().all(|team| team.len() == 2));
        let resources: HashSet<_> = teams.iter().map(|team| team.resource.number).collect();
        assert_eq!(resources, HashSet::from([10, 20]));
        let members = teams.iter().flat_map(|team| team.members.iter().map(|m| m.number)).sorted().collect_vec();
        assert_eq!(members, vec![1, 2, 3, 4]);
    }

    #[test]
    fn odd_remainder_goes_to_the_last_team() {
        let pool = pool(5, 3);
        for seed in 0..20 {
            let (teams, _) = sample(&pool, 2, seed);
            assert_eq!(teams.iter().map(Team::len).collect_vec(), vec![2, 2, 1]);
        }
    }

    #[test]
    fn same_seed_gives_same_teams_and_trail() {
        let pool = pool(9, 4);
        let (first, first_trail) = sample(&pool, 3, 1234);
        let (second, second_trail) = sample(&pool, 3, 1234);
        assert_eq!(first, second);
        assert_eq!(first_trail, second_trail);
    }

    #[test]
    fn trail_holds_one_valid_draw_per_placement() {
        let pool = pool(7, 5);
        let (teams, trail) = sample(&pool, 3, 99);

        let valid_resources = trail.events().iter()
            .filter(|e| matches!(e, AuditEvent::ResourceDraw { valid: true, .. }))
            .count();
        let valid_members = trail.events().iter()
            .filter(|e| matches!(e, AuditEvent::MemberDraw { valid: true, .. }))
            .count();
        let closed = trail.events().iter().filter(|e| **e == AuditEvent::TeamClosed).count();
        assert_eq!(valid_resources, teams.len());
        assert_eq!(valid_members, 7);
        assert_eq!(closed, teams.len());
    }

    #[test]
    fn rejected_draws_only_hit_taken_entries() {
        let pool = pool(12, 6);
        let (_, trail) = sample(&pool, 2, 5);
        let mut taken_members = HashSet::new();
        let mut taken_resources = HashSet::new();
        for event in trail.events() {
            match *event {
                AuditEvent::ResourceDraw { index, valid } => {
                    assert_eq!(valid, taken_resources.insert(index));
                }
                AuditEvent::MemberDraw { index, valid, .. } => {
                    assert_eq!(valid, taken_members.insert(index));
                }
                _ => {}
            }
        }
        assert_eq!(taken_members.len(), 12);
    }

    #[test]
    fn fails_when_free_resources_cannot_hold_the_rest() {
        let pool = pool(3, 1);
        let mut consumed = Consumed::for_pool(&pool);
        let mut audit = AuditTrail::new();
        let mut rng = SmallRng::seed_from_u64(0);
        let result = Sampler::new(&pool, 2, &mut consumed, &mut audit, &mut rng).run();
        assert_eq!(
            result.unwrap_err(),
            AllocationError::InsufficientCapacity { team_size: 2, needed: 2, available: 1 }
        );
        assert!(audit.is_empty());
    }
}
