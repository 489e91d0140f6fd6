//! Question entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub location_id: i32,
    pub category_id: i32,
    pub posted_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text")]
    pub body: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::LocationId",
        to = "super::location::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(has_many = "super::answer::Entity")]
    Answer,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for asklocal_core::domain::Question {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            location_id: model.location_id,
            category_id: model.category_id,
            posted_at: model.posted_at.into(),
            body: model.body,
        }
    }
}

impl From<asklocal_core::domain::NewQuestion> for ActiveModel {
    fn from(question: asklocal_core::domain::NewQuestion) -> Self {
        Self {
            id: NotSet,
            author_id: Set(question.author_id),
            location_id: Set(question.location_id),
            category_id: Set(question.category_id),
            posted_at: Set(question.posted_at.into()),
            body: Set(question.body),
        }
    }
}
