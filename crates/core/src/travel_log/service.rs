//! Travel log validation and construction.

use chrono::Utc;
use journey_shared::types::{TravelLogId, UserId};

use crate::error::ValidationError;
use crate::plan::TravelPlan;
use crate::travel_log::types::{LogPatch, NewLog, TravelLog};
use crate::validation::{check_coordinates, check_title, require_text};

/// Stateless service for travel logs.
pub struct TravelLogService;

impl TravelLogService {
    /// Rejects a rating outside 1..=5; an absent rating passes.
    pub fn check_rating(rating: Option<i16>) -> Result<(), ValidationError> {
        match rating {
            Some(value) if !(1..=5).contains(&value) => Err(ValidationError::Rating(value)),
            _ => Ok(()),
        }
    }

    fn validate(log: &TravelLog) -> Result<(), ValidationError> {
        check_title(&log.title)?;
        require_text("content", &log.content)?;
        Self::check_rating(log.rating)?;
        check_coordinates(log.latitude, log.longitude)
    }

    /// Builds a validated log for `plan` written by `author_id`.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule.
    pub fn build(
        plan: &TravelPlan,
        author_id: UserId,
        input: NewLog,
    ) -> Result<TravelLog, ValidationError> {
        let now = Utc::now();
        let log = TravelLog {
            id: TravelLogId::new(),
            plan_id: plan.id,
            itinerary_id: input.itinerary_id,
            author_id,
            title: input.title.trim().to_string(),
            content: input.content,
            log_date: input.log_date,
            privacy_level: input.privacy_level,
            rating: input.rating,
            location: input.location,
            latitude: input.latitude,
            longitude: input.longitude,
            weather: input.weather,
            mood: input.mood,
            images: input.images,
            tags: input.tags,
            created_at: now,
            updated_at: now,
        };
        Self::validate(&log)?;
        Ok(log)
    }

    /// Returns `log` with `patch` applied, or the first violated rule.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule of the patched log.
    pub fn patched(log: &TravelLog, patch: LogPatch) -> Result<TravelLog, ValidationError> {
        let mut next = log.clone();
        if let Some(title) = patch.title {
            next.title = title.trim().to_string();
        }
        if let Some(content) = patch.content {
            next.content = content;
        }
        if let Some(date) = patch.log_date {
            next.log_date = date;
        }
        if let Some(privacy) = patch.privacy_level {
            next.privacy_level = privacy;
        }
        if let Some(images) = patch.images {
            next.images = images;
        }
        if let Some(tags) = patch.tags {
            next.tags = tags;
        }
        if patch.itinerary_id.is_some() {
            next.itinerary_id = patch.itinerary_id;
        }
        if patch.rating.is_some() {
            next.rating = patch.rating;
        }
        if patch.latitude.is_some() {
            next.latitude = patch.latitude;
        }
        if patch.longitude.is_some() {
            next.longitude = patch.longitude;
        }
        next.location = patch.location.or(next.location);
        next.weather = patch.weather.or(next.weather);
        next.mood = patch.mood.or(next.mood);

        Self::validate(&next)?;
        next.updated_at = Utc::now();
        Ok(next)
    }
}
