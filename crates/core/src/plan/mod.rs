//! Travel plan lifecycle.
//!
//! - `types` - Plan record, inputs and the `TravelStatus` enum
//! - `lifecycle` - Status state machine and status gating of child writes
//! - `validation` - Field rules for plan creation and updates
//! - `share` - Share code generation for public plans

pub mod lifecycle;
pub mod share;
pub mod types;
pub mod validation;

#[cfg(test)]
mod lifecycle_props;

pub use lifecycle::PlanLifecycle;
pub use share::generate_share_code;
pub use types::{NewPlan, PlanFilter, PlanPatch, TravelPlan, TravelStatus};
pub use validation::{PlanChildren, apply_patch, build_plan};
