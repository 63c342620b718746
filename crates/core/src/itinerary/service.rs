//! Itinerary validation and construction.

use chrono::Utc;
use journey_shared::types::ItineraryId;
use std::cmp::Ordering;

use crate::error::ValidationError;
use crate::itinerary::types::{Itinerary, ItineraryPatch, NewItinerary};
use crate::plan::TravelPlan;
use crate::validation::{check_amount, check_coordinates, check_time_range, require_text};

/// Stateless service for itinerary items.
pub struct ItineraryService;

impl ItineraryService {
    /// Checks every field rule of `item` against its plan.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn validate(plan: &TravelPlan, item: &Itinerary) -> Result<(), ValidationError> {
        if item.day_number < 1 {
            return Err(ValidationError::OutOfRange {
                field: "day_number",
            });
        }
        if item.date < plan.start_date || item.date > plan.end_date {
            return Err(ValidationError::DateOutsidePlan {
                date: item.date,
                start: plan.start_date,
                end: plan.end_date,
            });
        }
        require_text("location", &item.location)?;
        require_text("activity", &item.activity)?;
        check_time_range(item.start_time, item.end_time)?;
        check_coordinates(item.latitude, item.longitude)?;
        check_amount("estimated_cost", item.estimated_cost)?;
        check_amount("actual_cost", item.actual_cost)
    }

    /// Builds a validated item for `plan`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn build(plan: &TravelPlan, input: NewItinerary) -> Result<Itinerary, ValidationError> {
        let now = Utc::now();
        let item = Itinerary {
            id: ItineraryId::new(),
            plan_id: plan.id,
            day_number: input.day_number,
            date: input.date,
            title: input.title,
            location: input.location,
            activity: input.activity,
            activity_type: input.activity_type,
            start_time: input.start_time,
            end_time: input.end_time,
            description: input.description,
            address: input.address,
            latitude: input.latitude,
            longitude: input.longitude,
            estimated_cost: input.estimated_cost,
            actual_cost: input.actual_cost,
            booking_reference: input.booking_reference,
            notes: input.notes,
            created_at: now,
            updated_at: now,
        };
        Self::validate(plan, &item)?;
        Ok(item)
    }

    /// Returns `item` with `patch` applied, or the first violated rule.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule of the patched item.
    pub fn patched(
        plan: &TravelPlan,
        item: &Itinerary,
        patch: ItineraryPatch,
    ) -> Result<Itinerary, ValidationError> {
        let mut next = item.clone();
        if let Some(v) = patch.day_number {
            next.day_number = v;
        }
        if let Some(v) = patch.date {
            next.date = v;
        }
        if let Some(v) = patch.location {
            next.location = v;
        }
        if let Some(v) = patch.activity {
            next.activity = v;
        }
        if let Some(v) = patch.activity_type {
            next.activity_type = v;
        }
        if patch.start_time.is_some() {
            next.start_time = patch.start_time;
        }
        if patch.end_time.is_some() {
            next.end_time = patch.end_time;
        }
        if patch.latitude.is_some() {
            next.latitude = patch.latitude;
        }
        if patch.longitude.is_some() {
            next.longitude = patch.longitude;
        }
        if patch.estimated_cost.is_some() {
            next.estimated_cost = patch.estimated_cost;
        }
        if patch.actual_cost.is_some() {
            next.actual_cost = patch.actual_cost;
        }
        next.title = patch.title.or(next.title);
        next.description = patch.description.or(next.description);
        next.address = patch.address.or(next.address);
        next.booking_reference = patch.booking_reference.or(next.booking_reference);
        next.notes = patch.notes.or(next.notes);

        Self::validate(plan, &next)?;
        next.updated_at = Utc::now();
        Ok(next)
    }

    /// Schedule order: day number, then start time with untimed items last.
    #[must_use]
    pub fn schedule_order(a: &Itinerary, b: &Itinerary) -> Ordering {
        a.day_number
            .cmp(&b.day_number)
            .then_with(|| match (a.start_time, b.start_time) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.created_at.cmp(&b.created_at))
    }
}
