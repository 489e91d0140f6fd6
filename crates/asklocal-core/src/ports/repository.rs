use async_trait::async_trait;

use crate::domain::{
    Answer, Category, Country, Entity, Location, Question, QuestionFilter, Recommendation, User,
};
use crate::error::RepoError;

/// Generic repository trait defining the record operations the core issues.
#[async_trait]
pub trait BaseRepository<T: Entity>: Send + Sync {
    /// Find an entity by its surrogate id.
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepoError>;

    /// Insert a draft and return the stored row with its new id.
    async fn insert(&self, draft: T::Draft) -> Result<T, RepoError>;

    /// Delete an entity by id, cascading to the rows it owns.
    async fn delete(&self, id: T::Id) -> Result<(), RepoError>;
}

/// Row lookup by exact field set.
#[async_trait]
pub trait DuplicateLookup<T: Entity>: Send + Sync {
    /// Return a stored row whose fields equal the candidate's on every column
    /// not named in `ignore`.
    async fn find_equivalent(
        &self,
        candidate: &T::Draft,
        ignore: &[&'static str],
    ) -> Result<Option<T>, RepoError>;
}

/// Country reference data. Read-only to request traffic.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, RepoError>;
}

/// Category reference data. Read-only to request traffic.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError>;

    /// Exact name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError>;

    async fn list(&self) -> Result<Vec<Category>, RepoError>;
}

pub trait LocationRepository: BaseRepository<Location> + DuplicateLookup<Location> {}

#[async_trait]
pub trait QuestionRepository: BaseRepository<Question> {
    async fn update_body(&self, id: i32, body: String) -> Result<Question, RepoError>;

    /// Equi-join questions with their author, category, location and country
    /// and keep rows satisfying every predicate.
    async fn filter(&self, filter: &QuestionFilter) -> Result<Vec<Question>, RepoError>;
}

#[async_trait]
pub trait AnswerRepository: BaseRepository<Answer> + DuplicateLookup<Answer> {
    async fn update_body(&self, id: i32, body: String) -> Result<Answer, RepoError>;

    async fn find_by_question(&self, question_id: i32) -> Result<Vec<Answer>, RepoError>;

    async fn list(&self) -> Result<Vec<Answer>, RepoError>;
}

#[async_trait]
pub trait RecommendationRepository:
    BaseRepository<Recommendation> + DuplicateLookup<Recommendation>
{
    async fn find_by_answers(&self, answer_ids: &[i32]) -> Result<Vec<Recommendation>, RepoError>;
}

/// User repository. Deleting a user cascades to everything they own.
#[async_trait]
pub trait UserRepository: BaseRepository<User> {
    async fn list(&self) -> Result<Vec<User>, RepoError>;
}
