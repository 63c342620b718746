//! `SeaORM` Entity for expenses table.

use super::sea_orm_active_enums::ExpenseCategory;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plan_id: Uuid,
    pub itinerary_id: Option<Uuid>,
    pub recorded_by: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,
    pub currency: String,
    #[sea_orm(column_type = "Decimal(Some((19, 10)))")]
    pub exchange_rate: Decimal,
    #[sea_orm(column_type = "Decimal(None)")]
    pub amount_in_base_currency: Decimal,
    pub category: ExpenseCategory,
    pub expense_date: Date,
    pub location: Option<String>,
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
    #[sea_orm(
        belongs_to = "super::itineraries::Entity",
        from = "Column::ItineraryId",
        to = "super::itineraries::Column::Id",
        on_delete = "SetNull"
    )]
    Itineraries,
}

impl Related<super::travel_plans::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TravelPlans.def()
    }
}

impl Related<super::itineraries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Itineraries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
