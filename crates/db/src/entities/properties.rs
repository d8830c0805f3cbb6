//! `SeaORM` Entity for the properties table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    /// Nightly price in points.
    pub price_per_night: i64,
    pub image_url: Option<String>,
    /// Derived mean of this property's rating rows, or 0 with none.
    /// Written only by `RatingRepository::recompute_average`.
    pub rating_avg: Decimal,
    pub is_listed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::OwnerId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
    #[sea_orm(has_many = "super::ratings::Entity")]
    Ratings,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
    #[sea_orm(has_many = "super::property_facilities::Entity")]
    PropertyFacilities,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl Related<super::ratings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl Related<super::facilities::Entity> for Entity {
    fn to() -> RelationDef {
        super::property_facilities::Relation::Facilities.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::property_facilities::Relation::Properties.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
