//! Field rules for plan creation and updates.

use chrono::{NaiveDate, Utc};
use journey_shared::types::{Currency, TravelPlanId, UserId};
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::plan::types::{NewPlan, PlanPatch, TravelPlan, TravelStatus};
use crate::validation::{check_amount, check_date_range, check_title, require_text};

/// What a plan update must stay consistent with.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanChildren {
    /// Whether any expense is recorded against the plan.
    pub has_expenses: bool,
    /// Earliest and latest itinerary dates, if any items exist.
    pub itinerary_span: Option<(NaiveDate, NaiveDate)>,
}

fn validate_fields(
    title: &str,
    destination: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    budget: Option<Decimal>,
) -> Result<(), ValidationError> {
    check_title(title)?;
    require_text("destination", destination)?;
    check_date_range(start_date, end_date)?;
    check_amount("budget", budget)
}

/// Validates `input` and builds a fresh plan in `planning`.
///
/// # Errors
///
/// Returns the first violated field rule.
pub fn build_plan(
    owner_id: UserId,
    input: NewPlan,
    default_currency: Currency,
) -> Result<TravelPlan, ValidationError> {
    validate_fields(
        &input.title,
        &input.destination,
        input.start_date,
        input.end_date,
        input.budget,
    )?;

    let now = Utc::now();
    Ok(TravelPlan {
        id: TravelPlanId::new(),
        owner_id,
        title: input.title.trim().to_string(),
        description: input.description,
        destination: input.destination.trim().to_string(),
        start_date: input.start_date,
        end_date: input.end_date,
        budget: input.budget,
        currency: input.currency.unwrap_or(default_currency),
        status: TravelStatus::Planning,
        is_public: false,
        share_code: None,
        tags: input.tags,
        cover_image: input.cover_image,
        total_cost: Decimal::ZERO,
        version: 1,
        archived_at: None,
        created_at: now,
        updated_at: now,
    })
}

/// Applies `patch` to `plan` if the result is valid; leaves `plan` untouched otherwise.
///
/// # Errors
///
/// Returns `ValidationError::CurrencyLocked` when the currency would change under
/// recorded expenses, `ValidationError::DateOutsidePlan` when the new range would
/// orphan itinerary items, or the first violated field rule.
pub fn apply_patch(
    plan: &mut TravelPlan,
    patch: PlanPatch,
    children: PlanChildren,
) -> Result<(), ValidationError> {
    let mut next = plan.clone();
    if let Some(currency) = patch.currency {
        if currency != plan.currency && children.has_expenses {
            return Err(ValidationError::CurrencyLocked);
        }
        next.currency = currency;
    }
    if let Some(title) = patch.title {
        next.title = title.trim().to_string();
    }
    if let Some(description) = patch.description {
        next.description = Some(description);
    }
    if let Some(destination) = patch.destination {
        next.destination = destination.trim().to_string();
    }
    if let Some(start_date) = patch.start_date {
        next.start_date = start_date;
    }
    if let Some(end_date) = patch.end_date {
        next.end_date = end_date;
    }
    if let Some(budget) = patch.budget {
        next.budget = Some(budget);
    }
    if let Some(tags) = patch.tags {
        next.tags = tags;
    }
    if let Some(cover_image) = patch.cover_image {
        next.cover_image = Some(cover_image);
    }

    validate_fields(
        &next.title,
        &next.destination,
        next.start_date,
        next.end_date,
        next.budget,
    )?;
    if let Some((first, last)) = children.itinerary_span {
        for date in [first, last] {
            if date < next.start_date || date > next.end_date {
                return Err(ValidationError::DateOutsidePlan {
                    date,
                    start: next.start_date,
                    end: next.end_date,
                });
            }
        }
    }

    next.updated_at = Utc::now();
    *plan = next;
    Ok(())
}
