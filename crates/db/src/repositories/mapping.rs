//! Conversions between `SeaORM` models and ledger domain types.

use chrono::{DateTime, FixedOffset, Utc};
use journey_core::LedgerError;
use journey_core::expense::{Expense, ExpenseCategory};
use journey_core::itinerary::{ActivityType, Itinerary};
use journey_core::plan::{TravelPlan, TravelStatus};
use journey_core::travel_log::{PrivacyLevel, TravelLog};
use journey_shared::types::Currency;
use sea_orm::{DbErr, Set, SqlErr};
use serde_json::Value as Json;

use crate::entities::sea_orm_active_enums as db_enums;
use crate::entities::{expenses, itineraries, travel_logs, travel_plans};

/// Maps a database error to a ledger error. Unique key violations become conflicts.
pub fn db_err(err: DbErr) -> LedgerError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => LedgerError::Conflict(detail),
        _ => LedgerError::Database(err.to_string()),
    }
}

fn utc(ts: DateTime<FixedOffset>) -> DateTime<Utc> {
    ts.with_timezone(&Utc)
}

fn currency(code: &str) -> Result<Currency, LedgerError> {
    code.parse()
        .map_err(|e: String| LedgerError::Database(format!("corrupt currency column: {e}")))
}

fn strings(value: Json, column: &str) -> Result<Vec<String>, LedgerError> {
    serde_json::from_value(value)
        .map_err(|e| LedgerError::Database(format!("corrupt {column} column: {e}")))
}

fn json(values: &[String]) -> Json {
    Json::from(values.to_vec())
}

// ============================================================================
// Enum conversions
// ============================================================================

pub(crate) const fn status_to_db(status: TravelStatus) -> db_enums::TravelStatus {
    match status {
        TravelStatus::Planning => db_enums::TravelStatus::Planning,
        TravelStatus::Confirmed => db_enums::TravelStatus::Confirmed,
        TravelStatus::InProgress => db_enums::TravelStatus::InProgress,
        TravelStatus::Completed => db_enums::TravelStatus::Completed,
        TravelStatus::Cancelled => db_enums::TravelStatus::Cancelled,
    }
}

pub(crate) const fn db_status_to_core(status: db_enums::TravelStatus) -> TravelStatus {
    match status {
        db_enums::TravelStatus::Planning => TravelStatus::Planning,
        db_enums::TravelStatus::Confirmed => TravelStatus::Confirmed,
        db_enums::TravelStatus::InProgress => TravelStatus::InProgress,
        db_enums::TravelStatus::Completed => TravelStatus::Completed,
        db_enums::TravelStatus::Cancelled => TravelStatus::Cancelled,
    }
}

const fn activity_to_db(activity: ActivityType) -> db_enums::ActivityType {
    match activity {
        ActivityType::Transportation => db_enums::ActivityType::Transportation,
        ActivityType::Accommodation => db_enums::ActivityType::Accommodation,
        ActivityType::Sightseeing => db_enums::ActivityType::Sightseeing,
        ActivityType::Dining => db_enums::ActivityType::Dining,
        ActivityType::Shopping => db_enums::ActivityType::Shopping,
        ActivityType::Entertainment => db_enums::ActivityType::Entertainment,
        ActivityType::Other => db_enums::ActivityType::Other,
    }
}

const fn db_activity_to_core(activity: db_enums::ActivityType) -> ActivityType {
    match activity {
        db_enums::ActivityType::Transportation => ActivityType::Transportation,
        db_enums::ActivityType::Accommodation => ActivityType::Accommodation,
        db_enums::ActivityType::Sightseeing => ActivityType::Sightseeing,
        db_enums::ActivityType::Dining => ActivityType::Dining,
        db_enums::ActivityType::Shopping => ActivityType::Shopping,
        db_enums::ActivityType::Entertainment => ActivityType::Entertainment,
        db_enums::ActivityType::Other => ActivityType::Other,
    }
}

pub(crate) const fn category_to_db(category: ExpenseCategory) -> db_enums::ExpenseCategory {
    match category {
        ExpenseCategory::Transportation => db_enums::ExpenseCategory::Transportation,
        ExpenseCategory::Accommodation => db_enums::ExpenseCategory::Accommodation,
        ExpenseCategory::Food => db_enums::ExpenseCategory::Food,
        ExpenseCategory::Sightseeing => db_enums::ExpenseCategory::Sightseeing,
        ExpenseCategory::Shopping => db_enums::ExpenseCategory::Shopping,
        ExpenseCategory::Entertainment => db_enums::ExpenseCategory::Entertainment,
        ExpenseCategory::Insurance => db_enums::ExpenseCategory::Insurance,
        ExpenseCategory::Visa => db_enums::ExpenseCategory::Visa,
        ExpenseCategory::Other => db_enums::ExpenseCategory::Other,
    }
}

const fn db_category_to_core(category: db_enums::ExpenseCategory) -> ExpenseCategory {
    match category {
        db_enums::ExpenseCategory::Transportation => ExpenseCategory::Transportation,
        db_enums::ExpenseCategory::Accommodation => ExpenseCategory::Accommodation,
        db_enums::ExpenseCategory::Food => ExpenseCategory::Food,
        db_enums::ExpenseCategory::Sightseeing => ExpenseCategory::Sightseeing,
        db_enums::ExpenseCategory::Shopping => ExpenseCategory::Shopping,
        db_enums::ExpenseCategory::Entertainment => ExpenseCategory::Entertainment,
        db_enums::ExpenseCategory::Insurance => ExpenseCategory::Insurance,
        db_enums::ExpenseCategory::Visa => ExpenseCategory::Visa,
        db_enums::ExpenseCategory::Other => ExpenseCategory::Other,
    }
}

const fn privacy_to_db(privacy: PrivacyLevel) -> db_enums::PrivacyLevel {
    match privacy {
        PrivacyLevel::Private => db_enums::PrivacyLevel::Private,
        PrivacyLevel::Public => db_enums::PrivacyLevel::Public,
        PrivacyLevel::Friends => db_enums::PrivacyLevel::Friends,
    }
}

const fn db_privacy_to_core(privacy: db_enums::PrivacyLevel) -> PrivacyLevel {
    match privacy {
        db_enums::PrivacyLevel::Private => PrivacyLevel::Private,
        db_enums::PrivacyLevel::Public => PrivacyLevel::Public,
        db_enums::PrivacyLevel::Friends => PrivacyLevel::Friends,
    }
}

// ============================================================================
// Plans
// ============================================================================

pub(crate) fn plan_from_model(model: travel_plans::Model) -> Result<TravelPlan, LedgerError> {
    Ok(TravelPlan {
        id: model.id.into(),
        owner_id: model.owner_id.into(),
        title: model.title,
        description: model.description,
        destination: model.destination,
        start_date: model.start_date,
        end_date: model.end_date,
        budget: model.budget,
        currency: currency(&model.currency)?,
        status: db_status_to_core(model.status),
        is_public: model.is_public,
        share_code: model.share_code,
        tags: strings(model.tags, "tags")?,
        cover_image: model.cover_image,
        total_cost: model.total_cost,
        version: model.version,
        archived_at: model.archived_at.map(utc),
        created_at: utc(model.created_at),
        updated_at: utc(model.updated_at),
    })
}

pub(crate) fn plan_to_active(plan: &TravelPlan) -> travel_plans::ActiveModel {
    travel_plans::ActiveModel {
        id: Set(plan.id.into_inner()),
        owner_id: Set(plan.owner_id.into_inner()),
        title: Set(plan.title.clone()),
        description: Set(plan.description.clone()),
        destination: Set(plan.destination.clone()),
        start_date: Set(plan.start_date),
        end_date: Set(plan.end_date),
        budget: Set(plan.budget),
        currency: Set(plan.currency.code().to_string()),
        status: Set(status_to_db(plan.status)),
        is_public: Set(plan.is_public),
        share_code: Set(plan.share_code.clone()),
        tags: Set(json(&plan.tags)),
        cover_image: Set(plan.cover_image.clone()),
        total_cost: Set(plan.total_cost),
        version: Set(plan.version),
        archived_at: Set(plan.archived_at.map(Into::into)),
        created_at: Set(plan.created_at.into()),
        updated_at: Set(plan.updated_at.into()),
    }
}

// ============================================================================
// Itineraries
// ============================================================================

pub(crate) fn itinerary_from_model(model: itineraries::Model) -> Itinerary {
    Itinerary {
        id: model.id.into(),
        plan_id: model.plan_id.into(),
        day_number: model.day_number,
        date: model.date,
        title: model.title,
        location: model.location,
        activity: model.activity,
        activity_type: db_activity_to_core(model.activity_type),
        start_time: model.start_time,
        end_time: model.end_time,
        description: model.description,
        address: model.address,
        latitude: model.latitude,
        longitude: model.longitude,
        estimated_cost: model.estimated_cost,
        actual_cost: model.actual_cost,
        booking_reference: model.booking_reference,
        notes: model.notes,
        created_at: utc(model.created_at),
        updated_at: utc(model.updated_at),
    }
}

pub(crate) fn itinerary_to_active(item: &Itinerary) -> itineraries::ActiveModel {
    itineraries::ActiveModel {
        id: Set(item.id.into_inner()),
        plan_id: Set(item.plan_id.into_inner()),
        day_number: Set(item.day_number),
        date: Set(item.date),
        title: Set(item.title.clone()),
        location: Set(item.location.clone()),
        activity: Set(item.activity.clone()),
        activity_type: Set(activity_to_db(item.activity_type)),
        start_time: Set(item.start_time),
        end_time: Set(item.end_time),
        description: Set(item.description.clone()),
        address: Set(item.address.clone()),
        latitude: Set(item.latitude),
        longitude: Set(item.longitude),
        estimated_cost: Set(item.estimated_cost),
        actual_cost: Set(item.actual_cost),
        booking_reference: Set(item.booking_reference.clone()),
        notes: Set(item.notes.clone()),
        created_at: Set(item.created_at.into()),
        updated_at: Set(item.updated_at.into()),
    }
}

// ============================================================================
// Expenses
// ============================================================================

pub(crate) fn expense_from_model(model: expenses::Model) -> Result<Expense, LedgerError> {
    Ok(Expense {
        id: model.id.into(),
        plan_id: model.plan_id.into(),
        itinerary_id: model.itinerary_id.map(Into::into),
        recorded_by: model.recorded_by.into(),
        title: model.title,
        description: model.description,
        amount: model.amount,
        currency: currency(&model.currency)?,
        exchange_rate: model.exchange_rate,
        amount_in_base_currency: model.amount_in_base_currency,
        category: db_category_to_core(model.category),
        expense_date: model.expense_date,
        location: model.location,
        notes: model.notes,
        created_at: utc(model.created_at),
        updated_at: utc(model.updated_at),
    })
}

pub(crate) fn expense_to_active(expense: &Expense) -> expenses::ActiveModel {
    expenses::ActiveModel {
        id: Set(expense.id.into_inner()),
        plan_id: Set(expense.plan_id.into_inner()),
        itinerary_id: Set(expense.itinerary_id.map(|id| id.into_inner())),
        recorded_by: Set(expense.recorded_by.into_inner()),
        title: Set(expense.title.clone()),
        description: Set(expense.description.clone()),
        amount: Set(expense.amount),
        currency: Set(expense.currency.code().to_string()),
        exchange_rate: Set(expense.exchange_rate),
        amount_in_base_currency: Set(expense.amount_in_base_currency),
        category: Set(category_to_db(expense.category)),
        expense_date: Set(expense.expense_date),
        location: Set(expense.location.clone()),
        notes: Set(expense.notes.clone()),
        created_at: Set(expense.created_at.into()),
        updated_at: Set(expense.updated_at.into()),
    }
}

// ============================================================================
// Travel logs
// ============================================================================

pub(crate) fn log_from_model(model: travel_logs::Model) -> Result<TravelLog, LedgerError> {
    Ok(TravelLog {
        id: model.id.into(),
        plan_id: model.plan_id.into(),
        itinerary_id: model.itinerary_id.map(Into::into),
        author_id: model.author_id.into(),
        title: model.title,
        content: model.content,
        log_date: model.log_date,
        privacy_level: db_privacy_to_core(model.privacy_level),
        rating: model.rating,
        location: model.location,
        latitude: model.latitude,
        longitude: model.longitude,
        weather: model.weather,
        mood: model.mood,
        images: strings(model.images, "images")?,
        tags: strings(model.tags, "tags")?,
        created_at: utc(model.created_at),
        updated_at: utc(model.updated_at),
    })
}

pub(crate) fn log_to_active(log: &TravelLog) -> travel_logs::ActiveModel {
    travel_logs::ActiveModel {
        id: Set(log.id.into_inner()),
        plan_id: Set(log.plan_id.into_inner()),
        itinerary_id: Set(log.itinerary_id.map(|id| id.into_inner())),
        author_id: Set(log.author_id.into_inner()),
        title: Set(log.title.clone()),
        content: Set(log.content.clone()),
        log_date: Set(log.log_date),
        privacy_level: Set(privacy_to_db(log.privacy_level)),
        rating: Set(log.rating),
        location: Set(log.location.clone()),
        latitude: Set(log.latitude),
        longitude: Set(log.longitude),
        weather: Set(log.weather.clone()),
        mood: Set(log.mood.clone()),
        images: Set(json(&log.images)),
        tags: Set(json(&log.tags)),
        created_at: Set(log.created_at.into()),
        updated_at: Set(log.updated_at.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn plan_model() -> travel_plans::Model {
        let now = Utc::now().into();
        travel_plans::Model {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            title: "Hokkaido".to_string(),
            description: None,
            destination: "Sapporo".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 2, 8).unwrap(),
            budget: Some(dec!(12000)),
            currency: "JPY".to_string(),
            status: db_enums::TravelStatus::InProgress,
            is_public: false,
            share_code: None,
            tags: serde_json::json!(["snow", "onsen"]),
            cover_image: None,
            total_cost: dec!(350.5),
            version: 4,
            archived_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_conversion_is_bijective() {
        for status in TravelStatus::ALL {
            assert_eq!(db_status_to_core(status_to_db(status)), status);
        }
    }

    #[test]
    fn test_plan_model_maps_to_domain() {
        let plan = plan_from_model(plan_model()).unwrap();
        assert_eq!(plan.currency, Currency::Jpy);
        assert_eq!(plan.status, TravelStatus::InProgress);
        assert_eq!(plan.tags, vec!["snow".to_string(), "onsen".to_string()]);
        assert_eq!(plan.version, 4);
    }

    #[test]
    fn test_corrupt_currency_is_a_database_error() {
        let mut model = plan_model();
        model.currency = "XXX".to_string();
        assert!(matches!(
            plan_from_model(model),
            Err(LedgerError::Database(_))
        ));
    }

    #[test]
    fn test_corrupt_tags_is_a_database_error() {
        let mut model = plan_model();
        model.tags = serde_json::json!({"not": "a list"});
        assert!(matches!(
            plan_from_model(model),
            Err(LedgerError::Database(_))
        ));
    }

    #[test]
    fn test_generic_db_error_maps_to_database() {
        let err = db_err(DbErr::Custom("boom".to_string()));
        assert!(matches!(err, LedgerError::Database(msg) if msg.contains("boom")));
    }
}
