//! `SeaORM` active enums mapped to PostgreSQL enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "travel_status")]
pub enum TravelStatus {
    #[sea_orm(string_value = "planning")]
    Planning,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "activity_type")]
pub enum ActivityType {
    #[sea_orm(string_value = "transportation")]
    Transportation,
    #[sea_orm(string_value = "accommodation")]
    Accommodation,
    #[sea_orm(string_value = "sightseeing")]
    Sightseeing,
    #[sea_orm(string_value = "dining")]
    Dining,
    #[sea_orm(string_value = "shopping")]
    Shopping,
    #[sea_orm(string_value = "entertainment")]
    Entertainment,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "expense_category")]
pub enum ExpenseCategory {
    #[sea_orm(string_value = "transportation")]
    Transportation,
    #[sea_orm(string_value = "accommodation")]
    Accommodation,
    #[sea_orm(string_value = "food")]
    Food,
    #[sea_orm(string_value = "sightseeing")]
    Sightseeing,
    #[sea_orm(string_value = "shopping")]
    Shopping,
    #[sea_orm(string_value = "entertainment")]
    Entertainment,
    #[sea_orm(string_value = "insurance")]
    Insurance,
    #[sea_orm(string_value = "visa")]
    Visa,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "privacy_level")]
pub enum PrivacyLevel {
    #[sea_orm(string_value = "private")]
    Private,
    #[sea_orm(string_value = "public")]
    Public,
    #[sea_orm(string_value = "friends")]
    Friends,
}
