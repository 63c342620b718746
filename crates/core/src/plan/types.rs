//! Plan domain types.

use chrono::{DateTime, NaiveDate, Utc};
use journey_shared::types::{Currency, TravelPlanId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a travel plan.
///
/// The valid transitions are:
/// - Planning → Confirmed | Cancelled
/// - Confirmed → InProgress | Cancelled
/// - InProgress → Completed | Cancelled
/// - Cancelled → Planning
///
/// Completed is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelStatus {
    /// Being planned. Initial state.
    Planning,
    /// Bookings confirmed.
    Confirmed,
    /// Trip under way.
    InProgress,
    /// Trip finished (terminal).
    Completed,
    /// Trip called off; may be revived into planning.
    Cancelled,
}

impl TravelStatus {
    /// All statuses.
    pub const ALL: [Self; 5] = [
        Self::Planning,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for TravelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A travel plan with its cached expense total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelPlan {
    /// Plan ID.
    pub id: TravelPlanId,
    /// Owning user.
    pub owner_id: UserId,
    /// Title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Destination.
    pub destination: String,
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip.
    pub end_date: NaiveDate,
    /// Optional budget in the plan currency.
    pub budget: Option<Decimal>,
    /// Base currency of the plan.
    pub currency: Currency,
    /// Lifecycle status.
    pub status: TravelStatus,
    /// Whether the plan is shared publicly.
    pub is_public: bool,
    /// Share code for public plans.
    pub share_code: Option<String>,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Cover image URL.
    pub cover_image: Option<String>,
    /// Sum of expense amounts in the plan currency.
    pub total_cost: Decimal,
    /// Optimistic concurrency counter, bumped by every plan write.
    pub version: i64,
    /// Set once the plan has been archived.
    pub archived_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TravelPlan {
    /// Returns true if `user` owns the plan.
    #[must_use]
    pub fn is_owned_by(&self, user: UserId) -> bool {
        self.owner_id == user
    }

    /// Returns true if `requester` may read the plan.
    #[must_use]
    pub fn is_visible_to(&self, requester: Option<UserId>) -> bool {
        self.is_public || requester.is_some_and(|user| self.is_owned_by(user))
    }
}

/// Input for creating a plan.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlan {
    /// Title.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Destination.
    pub destination: String,
    /// First day.
    pub start_date: NaiveDate,
    /// Last day.
    pub end_date: NaiveDate,
    /// Optional budget.
    #[serde(default)]
    pub budget: Option<Decimal>,
    /// Base currency; the configured default when omitted.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Cover image URL.
    #[serde(default)]
    pub cover_image: Option<String>,
}

/// Partial plan update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanPatch {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New destination.
    pub destination: Option<String>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
    /// New end date.
    pub end_date: Option<NaiveDate>,
    /// New budget.
    pub budget: Option<Decimal>,
    /// New base currency.
    pub currency: Option<Currency>,
    /// New tags.
    pub tags: Option<Vec<String>>,
    /// New cover image URL.
    pub cover_image: Option<String>,
}

/// Filters for listing a user's plans.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanFilter {
    /// Only plans in this status.
    pub status: Option<TravelStatus>,
    /// Case-insensitive destination substring.
    pub destination: Option<String>,
}

impl PlanFilter {
    /// Returns true if `plan` passes the filter.
    #[must_use]
    pub fn matches(&self, plan: &TravelPlan) -> bool {
        if self.status.is_some_and(|status| plan.status != status) {
            return false;
        }
        match &self.destination {
            Some(needle) => plan
                .destination
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}
