use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::audit::AuditTrail;
use crate::config::DealerConfig;
use crate::error::{AllocationError, DealerError};
use crate::io::{load_pool, render_allocation, stage};
use crate::model::team::Allocation;
use crate::pool::Pool;
use crate::sample::Sampler;
use crate::validate::{validate, Committed};

/// Result of one run: the teams, and how they were drawn.
#[derive(Debug, Clone)]
pub struct Dealt {
    pub allocation: Allocation,
    pub audit: AuditTrail,
}

/// Commits the fixed bindings of `pool`, then samples the rest with `rng`.
///
/// The committed teams come first in the allocation, in binding order.
pub fn deal<R: Rng + ?Sized>(pool: &Pool, team_size: usize, rng: &mut R) -> Result<Dealt, AllocationError> {
    let mut audit = AuditTrail::new();
    let Committed { mut teams, mut consumed } = validate(pool, team_size, &mut audit)?;
    debug!(committed = teams.len(), left = consumed.individuals_left(), "fixed bindings validated");

    let sampled = Sampler::new(pool, team_size, &mut consumed, &mut audit, rng).run()?;
    debug!(sampled = sampled.len(), rejected = audit.rejected(), "sampling finished");

    teams.extend(sampled);
    Ok(Dealt { allocation: Allocation { teams }, audit })
}

/// Loads the catalogs from the configured storage, deals, and writes the
/// allocation and the audit trail.
///
/// Both outputs are staged first and only moved into place once the run has
/// succeeded, so a failed run leaves the storage untouched.
pub fn run(config: &DealerConfig) -> Result<Dealt, DealerError> {
    config.validate()?;
    let pool = load_pool(&config.storage, &config.files)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(seed, team_size = config.team_size, "dealing resources");
    let mut rng = SmallRng::seed_from_u64(seed);
    let dealt = deal(&pool, config.team_size, &mut rng)?;

    let allocation = stage(&config.allocation_path(), &render_allocation(&dealt.allocation))?;
    let audit = stage(&config.audit_path(), &dealt.audit.to_string())?;
    let path = allocation.commit()?;
    info!(path = %path.display(), teams = dealt.allocation.team_count(), "Distribution finished");
    let path = audit.commit()?;
    info!(path = %path.display(), "Log saved");
    Ok(dealt)
}
