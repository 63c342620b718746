//! Expense domain types.

use chrono::{DateTime, NaiveDate, Utc};
use journey_shared::types::{Currency, ExpenseId, ItineraryId, TravelPlanId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Tickets and transfers.
    Transportation,
    /// Lodging.
    Accommodation,
    /// Meals and drinks.
    Food,
    /// Entry fees and tours.
    Sightseeing,
    /// Purchases.
    Shopping,
    /// Shows and events.
    Entertainment,
    /// Travel insurance.
    Insurance,
    /// Visa fees.
    Visa,
    /// Anything else.
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Returns the string representation of the category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Transportation => "transportation",
            Self::Accommodation => "accommodation",
            Self::Food => "food",
            Self::Sightseeing => "sightseeing",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Insurance => "insurance",
            Self::Visa => "visa",
            Self::Other => "other",
        }
    }
}

/// A recorded expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// Owning plan.
    pub plan_id: TravelPlanId,
    /// Itinerary item of the same plan, if any.
    pub itinerary_id: Option<ItineraryId>,
    /// User who recorded it.
    pub recorded_by: UserId,
    /// Title.
    pub title: String,
    /// Description.
    pub description: Option<String>,
    /// Amount in `currency`.
    pub amount: Decimal,
    /// Currency the amount was paid in.
    pub currency: Currency,
    /// Rate from `currency` into the plan currency, fixed at entry.
    pub exchange_rate: Decimal,
    /// `amount × exchange_rate`. Always derived.
    pub amount_in_base_currency: Decimal,
    /// Category.
    pub category: ExpenseCategory,
    /// Date the money was spent.
    pub expense_date: NaiveDate,
    /// Where.
    pub location: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for recording an expense.
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    /// Itinerary item this expense belongs to.
    #[serde(default)]
    pub itinerary_id: Option<ItineraryId>,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Amount.
    pub amount: Decimal,
    /// Currency; the plan currency when omitted.
    #[serde(default)]
    pub currency: Option<Currency>,
    /// Rate into the plan currency. Required for foreign currencies.
    #[serde(default)]
    pub exchange_rate: Option<Decimal>,
    /// Category.
    #[serde(default)]
    pub category: ExpenseCategory,
    /// Date spent.
    pub expense_date: NaiveDate,
    /// Where.
    #[serde(default)]
    pub location: Option<String>,
    /// Notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial expense update. `None` leaves a field unchanged.
///
/// Changing `currency` without a new `exchange_rate` re-resolves the rate
/// as if the expense were new.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpensePatch {
    /// Itinerary item.
    pub itinerary_id: Option<ItineraryId>,
    /// Title.
    pub title: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Amount.
    pub amount: Option<Decimal>,
    /// Currency.
    pub currency: Option<Currency>,
    /// Rate.
    pub exchange_rate: Option<Decimal>,
    /// Category.
    pub category: Option<ExpenseCategory>,
    /// Date spent.
    pub expense_date: Option<NaiveDate>,
    /// Where.
    pub location: Option<String>,
    /// Notes.
    pub notes: Option<String>,
}

/// Filters for listing a plan's expenses.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ExpenseFilter {
    /// Only this category.
    pub category: Option<ExpenseCategory>,
}
