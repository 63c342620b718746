//! `SeaORM` Entity for travel_plans table.

use super::sea_orm_active_enums::TravelStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "travel_plans")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub destination: String,
    pub start_date: Date,
    pub end_date: Date,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub budget: Option<Decimal>,
    pub currency: String,
    pub status: TravelStatus,
    pub is_public: bool,
    #[sea_orm(unique)]
    pub share_code: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: Json,
    pub cover_image: Option<String>,
    #[sea_orm(column_type = "Decimal(None)")]
    pub total_cost: Decimal,
    pub version: i64,
    pub archived_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(has_many = "super::itineraries::Entity")]
    Itineraries,
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
    #[sea_orm(has_many = "super::travel_logs::Entity")]
    TravelLogs,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::itineraries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Itineraries.def()
    }
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl Related<super::travel_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
