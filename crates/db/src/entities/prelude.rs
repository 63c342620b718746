//! `SeaORM` entity prelude.

pub use super::expenses::Entity as Expenses;
pub use super::itineraries::Entity as Itineraries;
pub use super::travel_logs::Entity as TravelLogs;
pub use super::travel_plans::Entity as TravelPlans;
pub use super::users::Entity as Users;
