//! PostgreSQL repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};

use asklocal_core::domain::{
    Answer, Category, Country, FilterTarget, Question, QuestionFilter, Recommendation, User,
};
use asklocal_core::error::RepoError;
use asklocal_core::ports::{
    AnswerRepository, CategoryRepository, CountryRepository, LocationRepository,
    QuestionRepository, RecommendationRepository, Repositories, UserRepository,
};

use super::entity::{answer, category, country, location, question, recommendation, user};
use super::postgres_base::{PostgresBaseRepository, filter_condition, map_db_err};

pub type PostgresCountryRepository = PostgresBaseRepository<country::Entity>;
pub type PostgresCategoryRepository = PostgresBaseRepository<category::Entity>;
pub type PostgresLocationRepository = PostgresBaseRepository<location::Entity>;
pub type PostgresQuestionRepository = PostgresBaseRepository<question::Entity>;
pub type PostgresAnswerRepository = PostgresBaseRepository<answer::Entity>;
pub type PostgresRecommendationRepository = PostgresBaseRepository<recommendation::Entity>;
pub type PostgresUserRepository = PostgresBaseRepository<user::Entity>;

/// Every repository backed by one connection pool.
pub fn postgres_repositories(db: DbConn) -> Repositories {
    let db = Arc::new(db);
    Repositories {
        countries: Arc::new(PostgresCountryRepository::shared(Arc::clone(&db))),
        categories: Arc::new(PostgresCategoryRepository::shared(Arc::clone(&db))),
        locations: Arc::new(PostgresLocationRepository::shared(Arc::clone(&db))),
        questions: Arc::new(PostgresQuestionRepository::shared(Arc::clone(&db))),
        answers: Arc::new(PostgresAnswerRepository::shared(Arc::clone(&db))),
        recommendations: Arc::new(PostgresRecommendationRepository::shared(Arc::clone(&db))),
        users: Arc::new(PostgresUserRepository::shared(db)),
    }
}

#[async_trait]
impl CountryRepository for PostgresCountryRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, RepoError> {
        let result = country::Entity::find_by_id(code.to_owned())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let result = category::Entity::find()
            .filter(category::Column::Name.eq(name))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let result = category::Entity::find()
            .order_by_asc(category::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

impl LocationRepository for PostgresLocationRepository {}

#[async_trait]
impl QuestionRepository for PostgresQuestionRepository {
    async fn update_body(&self, id: i32, body: String) -> Result<Question, RepoError> {
        let existing = question::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: question::ActiveModel = existing.into();
        active.body = Set(body);
        let model = active.update(&*self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn filter(&self, filter: &QuestionFilter) -> Result<Vec<Question>, RepoError> {
        let mut condition = Condition::all();
        for predicate in filter.predicates() {
            let expr = match predicate.target {
                FilterTarget::Question => {
                    filter_condition::<question::Entity>(predicate.column, &predicate.value)?
                }
                FilterTarget::User => {
                    filter_condition::<user::Entity>(predicate.column, &predicate.value)?
                }
                FilterTarget::Category => {
                    filter_condition::<category::Entity>(predicate.column, &predicate.value)?
                }
                FilterTarget::Location => {
                    filter_condition::<location::Entity>(predicate.column, &predicate.value)?
                }
                FilterTarget::Country => {
                    filter_condition::<country::Entity>(predicate.column, &predicate.value)?
                }
            };
            condition = condition.add(expr);
        }

        tracing::debug!(predicates = filter.predicates().len(), "Filtering questions");

        let result = question::Entity::find()
            .join(JoinType::InnerJoin, question::Relation::User.def())
            .join(JoinType::InnerJoin, question::Relation::Category.def())
            .join(JoinType::InnerJoin, question::Relation::Location.def())
            .join(JoinType::InnerJoin, location::Relation::Country.def())
            .filter(condition)
            .order_by_asc(question::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl AnswerRepository for PostgresAnswerRepository {
    async fn update_body(&self, id: i32, body: String) -> Result<Answer, RepoError> {
        let existing = answer::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(RepoError::NotFound)?;

        let mut active: answer::ActiveModel = existing.into();
        active.body = Set(body);
        let model = active.update(&*self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn find_by_question(&self, question_id: i32) -> Result<Vec<Answer>, RepoError> {
        let result = answer::Entity::find()
            .filter(answer::Column::QuestionId.eq(question_id))
            .order_by_asc(answer::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn list(&self) -> Result<Vec<Answer>, RepoError> {
        let result = answer::Entity::find()
            .order_by_asc(answer::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl RecommendationRepository for PostgresRecommendationRepository {
    async fn find_by_answers(&self, answer_ids: &[i32]) -> Result<Vec<Recommendation>, RepoError> {
        if answer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = recommendation::Entity::find()
            .filter(recommendation::Column::AnswerId.is_in(answer_ids.iter().copied()))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let result = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
