//! Core business logic for Journey.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `plan` - Plan lifecycle state machine and field rules
//! - `itinerary` - Scheduled activities within a plan
//! - `expense` - Exchange-rate rules, totals and budget usage
//! - `travel_log` - Journal entries and visibility gating
//! - `trip` - The trip ledger tying a plan and its children together
//! - `auth` - Password hashing and account field rules

pub mod auth;
pub mod error;
pub mod expense;
pub mod itinerary;
pub mod plan;
pub mod travel_log;
pub mod trip;
pub mod validation;

pub use error::{LedgerError, LedgerResult, ValidationError};
pub use trip::TripLedger;
