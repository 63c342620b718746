//! `SeaORM` Entity for itineraries table.

use super::sea_orm_active_enums::ActivityType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "itineraries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub day_number: i32,
    pub date: Date,
    pub title: Option<String>,
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub activity: String,
    pub activity_type: ActivityType,
    pub start_time: Option<Time>,
    pub end_time: Option<Time>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub address: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    pub latitude: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((9, 6)))", nullable)]
    pub longitude: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub estimated_cost: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))", nullable)]
    pub actual_cost: Option<Decimal>,
    pub booking_reference: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::travel_plans::Entity",
        from = "Column::PlanId",
        to = "super::travel_plans::Column::Id",
        on_delete = "Cascade"
    )]
    TravelPlans,
}

impl Related<super::travel_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelPlans.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
