//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod mapping;
pub mod trip_ledger;
pub mod user;

pub use mapping::db_err;
pub use trip_ledger::TripLedgerRepository;
pub use user::{CreateUserInput, UpdateProfileInput, UserRepository};
