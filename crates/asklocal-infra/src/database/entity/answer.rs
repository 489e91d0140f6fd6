//! Answer entity for SeaORM. Replies point at their parent answer.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub author_id: i32,
    pub question_id: i32,
    pub parent_id: Option<i32>,
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
        belongs_to = "super::question::Entity",
        from = "Column::QuestionId",
        to = "super::question::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Question,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Parent,
    #[sea_orm(has_many = "super::recommendation::Entity")]
    Recommendation,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::recommendation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Recommendation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for asklocal_core::domain::Answer {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            question_id: model.question_id,
            parent_id: model.parent_id,
            posted_at: model.posted_at.into(),
            body: model.body,
        }
    }
}

impl From<asklocal_core::domain::NewAnswer> for ActiveModel {
    fn from(answer: asklocal_core::domain::NewAnswer) -> Self {
        Self {
            id: NotSet,
            author_id: Set(answer.author_id),
            question_id: Set(answer.question_id),
            parent_id: Set(answer.parent_id),
            posted_at: Set(answer.posted_at.into()),
            body: Set(answer.body),
        }
    }
}
