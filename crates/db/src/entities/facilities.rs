//! `SeaORM` Entity for the facilities table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "facilities")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::property_facilities::Entity")]
    PropertyFacilities,
}

impl Related<super::properties::Entity> for Entity {
    fn to() -> RelationDef {
        super::property_facilities::Relation::Properties.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::property_facilities::Relation::Facilities.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
