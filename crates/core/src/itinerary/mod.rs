//! Itinerary items scheduled within a plan.

pub mod service;
pub mod types;

pub use service::ItineraryService;
pub use types::{ActivityType, Itinerary, ItineraryPatch, NewItinerary};
