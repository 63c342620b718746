//! The trip ledger: plans and their children kept consistent as one unit.
//!
//! - `ledger` - In-memory [`TripLedger`] enforcing status gating, cached
//!   totals, ownership and log visibility
//! - `archive` - Archival of completed plans with optimistic version checks
//! - `access` - Ownership and visibility checks shared with persistent stores

pub mod access;
pub mod archive;
pub mod ledger;

#[cfg(test)]
mod ledger_props;
#[cfg(test)]
mod scenarios;

pub use access::{SharedPlan, authorize_owner, authorize_reader};
pub use archive::{ArchiveCandidate, ArchiveReport, is_archivable};
pub use ledger::TripLedger;
