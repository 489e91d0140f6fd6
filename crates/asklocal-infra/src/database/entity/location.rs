//! Location entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "locations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub country_code: String,
    pub state: String,
    pub postcode: String,
    pub suburb: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryCode",
        to = "super::country::Column::Code",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Country,
    #[sea_orm(has_many = "super::question::Entity")]
    Question,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for asklocal_core::domain::Location {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            country_code: model.country_code,
            state: model.state,
            postcode: model.postcode,
            suburb: model.suburb,
        }
    }
}

/// Insert draft to ActiveModel; the id is left to the sequence.
impl From<asklocal_core::domain::NewLocation> for ActiveModel {
    fn from(location: asklocal_core::domain::NewLocation) -> Self {
        Self {
            id: NotSet,
            country_code: Set(location.country_code),
            state: Set(location.state),
            postcode: Set(location.postcode),
            suburb: Set(location.suburb),
        }
    }
}
