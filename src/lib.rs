//! Deals a finite pool of resources (projects) to fixed-size teams of
//! individuals.
//!
//! Fixed bindings supplied up front are validated and committed first; the
//! remaining individuals and resources are then paired by rejection sampling.
//! Every decision is kept in an [`audit::AuditTrail`].

pub mod audit;
pub mod config;
pub mod consumed;
pub mod dealer;
pub mod error;
pub mod io;
pub mod model;
pub mod pool;
pub mod sample;
pub mod validate;

pub use audit::{AuditEvent, AuditTrail};
pub use config::{DealerConfig, FileNames};
pub use dealer::{deal, run, Dealt};
pub use error::{AllocationError, DealerError};
pub use model::entity::{Index, Individual, Number, Resource};
pub use model::team::{Allocation, FixedBinding, Team};
pub use pool::{Pool, PoolError};
