//! `SeaORM` entities.

pub mod prelude;

pub mod expenses;
pub mod itineraries;
pub mod sea_orm_active_enums;
pub mod travel_logs;
pub mod travel_plans;
pub mod users;
