//! Travel log domain types.

use chrono::{DateTime, NaiveDate, Utc};
use journey_shared::types::{ItineraryId, TravelLogId, TravelPlanId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Who may read a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    /// Author only.
    #[default]
    Private,
    /// Anyone.
    Public,
    /// Author and the author's friends.
    Friends,
}

impl PrivacyLevel {
    /// Returns the string representation of the privacy level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
            Self::Friends => "friends",
        }
    }
}

/// A journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelLog {
    /// Log ID.
    pub id: TravelLogId,
    /// Owning plan.
    pub plan_id: TravelPlanId,
    /// Itinerary item of the same plan, if any.
    pub itinerary_id: Option<ItineraryId>,
    /// Author.
    pub author_id: UserId,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Day the entry is about.
    pub log_date: NaiveDate,
    /// Visibility.
    pub privacy_level: PrivacyLevel,
    /// Rating from 1 to 5.
    pub rating: Option<i16>,
    /// Place name.
    pub location: Option<String>,
    /// Latitude.
    pub latitude: Option<Decimal>,
    /// Longitude.
    pub longitude: Option<Decimal>,
    /// Weather.
    pub weather: Option<String>,
    /// Mood.
    pub mood: Option<String>,
    /// Image URLs.
    pub images: Vec<String>,
    /// Tags.
    pub tags: Vec<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for writing a log entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLog {
    /// Itinerary item.
    #[serde(default)]
    pub itinerary_id: Option<ItineraryId>,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Day the entry is about.
    pub log_date: NaiveDate,
    /// Visibility; private when omitted.
    #[serde(default)]
    pub privacy_level: PrivacyLevel,
    /// Rating.
    #[serde(default)]
    pub rating: Option<i16>,
    /// Place name.
    #[serde(default)]
    pub location: Option<String>,
    /// Latitude.
    #[serde(default)]
    pub latitude: Option<Decimal>,
    /// Longitude.
    #[serde(default)]
    pub longitude: Option<Decimal>,
    /// Weather.
    #[serde(default)]
    pub weather: Option<String>,
    /// Mood.
    #[serde(default)]
    pub mood: Option<String>,
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial log update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogPatch {
    /// Itinerary item.
    pub itinerary_id: Option<ItineraryId>,
    /// Title.
    pub title: Option<String>,
    /// Body text.
    pub content: Option<String>,
    /// Day.
    pub log_date: Option<NaiveDate>,
    /// Visibility.
    pub privacy_level: Option<PrivacyLevel>,
    /// Rating.
    pub rating: Option<i16>,
    /// Place name.
    pub location: Option<String>,
    /// Latitude.
    pub latitude: Option<Decimal>,
    /// Longitude.
    pub longitude: Option<Decimal>,
    /// Weather.
    pub weather: Option<String>,
    /// Mood.
    pub mood: Option<String>,
    /// Image URLs.
    pub images: Option<Vec<String>>,
    /// Tags.
    pub tags: Option<Vec<String>>,
}
