//! Itinerary domain types.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use journey_shared::types::{ItineraryId, TravelPlanId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of scheduled activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    /// Flights, trains, transfers.
    Transportation,
    /// Hotels and other lodging.
    Accommodation,
    /// Sights and tours.
    Sightseeing,
    /// Meals.
    Dining,
    /// Shopping.
    Shopping,
    /// Shows, events, nightlife.
    Entertainment,
    /// Anything else.
    #[default]
    Other,
}

impl ActivityType {
    /// Returns the string representation of the activity type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::Accommodation => "accommodation",
            Self::Sightseeing => "sightseeing",
            Self::Dining => "dining",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Other => "other",
        }
    }
}

/// A scheduled activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    /// Item ID.
    pub id: ItineraryId,
    /// Owning plan.
    pub plan_id: TravelPlanId,
    /// Day of the trip, starting at 1.
    pub day_number: i32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Optional headline.
    pub title: Option<String>,
    /// Place name.
    pub location: String,
    /// What happens.
    pub activity: String,
    /// Kind of activity.
    pub activity_type: ActivityType,
    /// Start time.
    pub start_time: Option<NaiveTime>,
    /// End time.
    pub end_time: Option<NaiveTime>,
    /// Longer description.
    pub description: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Latitude in degrees.
    pub latitude: Option<Decimal>,
    /// Longitude in degrees.
    pub longitude: Option<Decimal>,
    /// Expected cost in the plan currency.
    pub estimated_cost: Option<Decimal>,
    /// Actual cost in the plan currency.
    pub actual_cost: Option<Decimal>,
    /// Booking reference.
    pub booking_reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for adding an itinerary item.
#[derive(Debug, Clone, Deserialize)]
pub struct NewItinerary {
    /// Day of the trip.
    pub day_number: i32,
    /// Calendar date.
    pub date: NaiveDate,
    /// Optional headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Place name.
    pub location: String,
    /// What happens.
    pub activity: String,
    /// Kind of activity.
    #[serde(default)]
    pub activity_type: ActivityType,
    /// Start time.
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    /// End time.
    #[serde(default)]
    pub end_time: Option<NaiveTime>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Street address.
    #[serde(default)]
    pub address: Option<String>,
    /// Latitude.
    #[serde(default)]
    pub latitude: Option<Decimal>,
    /// Longitude.
    #[serde(default)]
    pub longitude: Option<Decimal>,
    /// Expected cost.
    #[serde(default)]
    pub estimated_cost: Option<Decimal>,
    /// Actual cost.
    #[serde(default)]
    pub actual_cost: Option<Decimal>,
    /// Booking reference.
    #[serde(default)]
    pub booking_reference: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial itinerary update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItineraryPatch {
    /// Day of the trip.
    pub day_number: Option<i32>,
    /// Calendar date.
    pub date: Option<NaiveDate>,
    /// Headline.
    pub title: Option<String>,
    /// Place name.
    pub location: Option<String>,
    /// What happens.
    pub activity: Option<String>,
    /// Kind of activity.
    pub activity_type: Option<ActivityType>,
    /// Start time.
    pub start_time: Option<NaiveTime>,
    /// End time.
    pub end_time: Option<NaiveTime>,
    /// Description.
    pub description: Option<String>,
    /// Address.
    pub address: Option<String>,
    /// Latitude.
    pub latitude: Option<Decimal>,
    /// Longitude.
    pub longitude: Option<Decimal>,
    /// Expected cost.
    pub estimated_cost: Option<Decimal>,
    /// Actual cost.
    pub actual_cost: Option<Decimal>,
    /// Booking reference.
    pub booking_reference: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}
