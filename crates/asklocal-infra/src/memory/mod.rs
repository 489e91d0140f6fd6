//! In-memory store implementing every repository port.
//!
//! Used when no database is configured and as the test double for service
//! tests. Data is lost on process restart.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use asklocal_core::domain::{
    Answer, Category, Country, Entity, FilterTarget, Location, NewAnswer, NewLocation,
    NewQuestion, NewRecommendation, NewUser, Question, QuestionFilter, Recommendation, User,
};
use asklocal_core::error::RepoError;
use asklocal_core::ports::{
    AnswerRepository, BaseRepository, CategoryRepository, CountryRepository, DuplicateLookup,
    LocationRepository, QuestionRepository, RecommendationRepository, UserRepository,
};
use asklocal_core::services::duplicate::is_equivalent;

use crate::seed;

/// Reject a row whose referenced row is missing, as the database's foreign
/// keys do.
fn foreign_key(present: bool, reference: &str) -> Result<(), RepoError> {
    if present {
        Ok(())
    } else {
        Err(RepoError::Constraint(format!("{reference} does not exist")))
    }
}

#[derive(Default)]
struct Tables {
    countries: BTreeMap<String, Country>,
    categories: BTreeMap<i32, Category>,
    locations: BTreeMap<i32, Location>,
    questions: BTreeMap<i32, Question>,
    answers: BTreeMap<i32, Answer>,
    recommendations: BTreeMap<i32, Recommendation>,
    users: BTreeMap<i32, User>,
    sequences: HashMap<&'static str, i32>,
}

impl Tables {
    fn next_id(&mut self, table: &'static str) -> i32 {
        let next = self.sequences.entry(table).or_insert(0);
        *next += 1;
        *next
    }

    fn find_equivalent<T: Entity>(
        rows: &BTreeMap<i32, T>,
        candidate: &T::Draft,
        ignore: &[&'static str],
    ) -> Option<T> {
        rows.values()
            .find(|row| is_equivalent(candidate, *row, ignore))
            .cloned()
    }

    /// Remove answers, their transitive replies and their recommendations.
    fn remove_answers(&mut self, ids: impl IntoIterator<Item = i32>) {
        let mut doomed: BTreeSet<i32> = ids.into_iter().collect();
        loop {
            let replies: Vec<i32> = self
                .answers
                .values()
                .filter(|a| !doomed.contains(&a.id))
                .filter(|a| a.parent_id.is_some_and(|p| doomed.contains(&p)))
                .map(|a| a.id)
                .collect();
            if replies.is_empty() {
                break;
            }
            doomed.extend(replies);
        }

        self.answers.retain(|id, _| !doomed.contains(id));
        self.recommendations
            .retain(|_, r| !doomed.contains(&r.answer_id));
    }

    fn remove_question(&mut self, id: i32) {
        let answers: Vec<i32> = self
            .answers
            .values()
            .filter(|a| a.question_id == id)
            .map(|a| a.id)
            .collect();
        self.remove_answers(answers);
        self.questions.remove(&id);
    }

    fn remove_user(&mut self, id: i32) {
        let questions: Vec<i32> = self
            .questions
            .values()
            .filter(|q| q.author_id == id)
            .map(|q| q.id)
            .collect();
        for question in questions {
            self.remove_question(question);
        }

        let answers: Vec<i32> = self
            .answers
            .values()
            .filter(|a| a.author_id == id)
            .map(|a| a.id)
            .collect();
        self.remove_answers(answers);

        self.recommendations.retain(|_, r| r.user_id != id);
        self.users.remove(&id);
    }

    /// Inner join of a question with its author, category, location and
    /// country, checked against every predicate.
    fn question_matches(&self, question: &Question, filter: &QuestionFilter) -> bool {
        let (Some(user), Some(category), Some(location)) = (
            self.users.get(&question.author_id),
            self.categories.get(&question.category_id),
            self.locations.get(&question.location_id),
        ) else {
            return false;
        };
        let Some(country) = self.countries.get(&location.country_code) else {
            return false;
        };

        filter.accepts(FilterTarget::Question, question)
            && filter.accepts(FilterTarget::User, user)
            && filter.accepts(FilterTarget::Category, category)
            && filter.accepts(FilterTarget::Location, location)
            && filter.accepts(FilterTarget::Country, country)
    }
}

/// In-memory store backed by ordered maps behind an async RwLock.
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// An empty store with no reference data.
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// A store holding the operator reference data and demo users.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();

        for (code, name) in seed::COUNTRIES {
            tables
                .countries
                .insert(code.to_string(), Country::new(*code, *name));
        }
        for (name, description) in seed::CATEGORIES {
            let id = tables.next_id("categories");
            tables.categories.insert(
                id,
                Category {
                    id,
                    name: name.to_string(),
                    description: description.to_string(),
                },
            );
        }
        for (country_code, state, postcode, suburb) in seed::HOME_LOCATIONS {
            let id = tables.next_id("locations");
            let draft = NewLocation {
                country_code: country_code.to_string(),
                state: state.to_string(),
                postcode: postcode.to_string(),
                suburb: suburb.to_string(),
            };
            tables.locations.insert(id, draft.into_location(id));
        }
        for (username, email) in seed::USERS {
            let id = tables.next_id("users");
            let draft = NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: seed::UNUSABLE_PASSWORD_HASH.to_string(),
            };
            tables.users.insert(id, draft.into_user(id));
        }

        tracing::debug!(
            countries = tables.countries.len(),
            categories = tables.categories.len(),
            locations = tables.locations.len(),
            "In-memory store seeded"
        );
        Self {
            tables: RwLock::new(tables),
        }
    }

    /// Row counts, for diagnostics and tests.
    pub async fn counts(&self) -> StoreCounts {
        let tables = self.tables.read().await;
        StoreCounts {
            locations: tables.locations.len(),
            questions: tables.questions.len(),
            answers: tables.answers.len(),
            recommendations: tables.recommendations.len(),
            users: tables.users.len(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub locations: usize,
    pub questions: usize,
    pub answers: usize,
    pub recommendations: usize,
    pub users: usize,
}

#[async_trait]
impl CountryRepository for InMemoryStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Country>, RepoError> {
        Ok(self.tables.read().await.countries.get(code).cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().find(|c| c.name == name).cloned())
    }

    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        Ok(self.tables.read().await.categories.values().cloned().collect())
    }
}

#[async_trait]
impl BaseRepository<Location> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, RepoError> {
        Ok(self.tables.read().await.locations.get(&id).cloned())
    }

    async fn insert(&self, draft: NewLocation) -> Result<Location, RepoError> {
        let mut tables = self.tables.write().await;
        foreign_key(tables.countries.contains_key(&draft.country_code), "country")?;
        if Tables::find_equivalent(&tables.locations, &draft, &["id"]).is_some() {
            return Err(RepoError::Constraint(
                "location natural key already exists".to_string(),
            ));
        }
        let id = tables.next_id("locations");
        let location = draft.into_location(id);
        tables.locations.insert(id, location.clone());
        Ok(location)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.questions.values().any(|q| q.location_id == id) {
            return Err(RepoError::Constraint(
                "location is referenced by questions".to_string(),
            ));
        }
        tables.locations.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl DuplicateLookup<Location> for InMemoryStore {
    async fn find_equivalent(
        &self,
        candidate: &NewLocation,
        ignore: &[&'static str],
    ) -> Result<Option<Location>, RepoError> {
        let tables = self.tables.read().await;
        Ok(Tables::find_equivalent(&tables.locations, candidate, ignore))
    }
}

impl LocationRepository for InMemoryStore {}

#[async_trait]
impl BaseRepository<Question> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Question>, RepoError> {
        Ok(self.tables.read().await.questions.get(&id).cloned())
    }

    async fn insert(&self, draft: NewQuestion) -> Result<Question, RepoError> {
        let mut tables = self.tables.write().await;
        foreign_key(tables.users.contains_key(&draft.author_id), "author")?;
        foreign_key(tables.locations.contains_key(&draft.location_id), "location")?;
        foreign_key(tables.categories.contains_key(&draft.category_id), "category")?;
        let id = tables.next_id("questions");
        let question = draft.into_question(id);
        tables.questions.insert(id, question.clone());
        Ok(question)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.questions.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.remove_question(id);
        Ok(())
    }
}

#[async_trait]
impl QuestionRepository for InMemoryStore {
    async fn update_body(&self, id: i32, body: String) -> Result<Question, RepoError> {
        let mut tables = self.tables.write().await;
        let question = tables.questions.get_mut(&id).ok_or(RepoError::NotFound)?;
        question.body = body;
        Ok(question.clone())
    }

    async fn filter(&self, filter: &QuestionFilter) -> Result<Vec<Question>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| tables.question_matches(q, filter))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<Answer> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Answer>, RepoError> {
        Ok(self.tables.read().await.answers.get(&id).cloned())
    }

    async fn insert(&self, draft: NewAnswer) -> Result<Answer, RepoError> {
        let mut tables = self.tables.write().await;
        foreign_key(tables.users.contains_key(&draft.author_id), "author")?;
        foreign_key(tables.questions.contains_key(&draft.question_id), "question")?;
        if let Some(parent_id) = draft.parent_id {
            foreign_key(tables.answers.contains_key(&parent_id), "parent answer")?;
        }
        let id = tables.next_id("answers");
        let answer = draft.into_answer(id);
        tables.answers.insert(id, answer.clone());
        Ok(answer)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.answers.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.remove_answers([id]);
        Ok(())
    }
}

#[async_trait]
impl DuplicateLookup<Answer> for InMemoryStore {
    async fn find_equivalent(
        &self,
        candidate: &NewAnswer,
        ignore: &[&'static str],
    ) -> Result<Option<Answer>, RepoError> {
        let tables = self.tables.read().await;
        Ok(Tables::find_equivalent(&tables.answers, candidate, ignore))
    }
}

#[async_trait]
impl AnswerRepository for InMemoryStore {
    async fn update_body(&self, id: i32, body: String) -> Result<Answer, RepoError> {
        let mut tables = self.tables.write().await;
        let answer = tables.answers.get_mut(&id).ok_or(RepoError::NotFound)?;
        answer.body = body;
        Ok(answer.clone())
    }

    async fn find_by_question(&self, question_id: i32) -> Result<Vec<Answer>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .answers
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect())
    }

    async fn list(&self) -> Result<Vec<Answer>, RepoError> {
        Ok(self.tables.read().await.answers.values().cloned().collect())
    }
}

#[async_trait]
impl BaseRepository<Recommendation> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recommendation>, RepoError> {
        Ok(self.tables.read().await.recommendations.get(&id).cloned())
    }

    async fn insert(&self, draft: NewRecommendation) -> Result<Recommendation, RepoError> {
        let mut tables = self.tables.write().await;
        foreign_key(tables.users.contains_key(&draft.user_id), "user")?;
        foreign_key(tables.answers.contains_key(&draft.answer_id), "answer")?;
        if Tables::find_equivalent(&tables.recommendations, &draft, &["id"]).is_some() {
            return Err(RepoError::Constraint(
                "recommendation already exists".to_string(),
            ));
        }
        let id = tables.next_id("recommendations");
        let rec = draft.into_recommendation(id);
        tables.recommendations.insert(id, rec.clone());
        Ok(rec)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.recommendations.remove(&id).ok_or(RepoError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl DuplicateLookup<Recommendation> for InMemoryStore {
    async fn find_equivalent(
        &self,
        candidate: &NewRecommendation,
        ignore: &[&'static str],
    ) -> Result<Option<Recommendation>, RepoError> {
        let tables = self.tables.read().await;
        Ok(Tables::find_equivalent(&tables.recommendations, candidate, ignore))
    }
}

#[async_trait]
impl RecommendationRepository for InMemoryStore {
    async fn find_by_answers(&self, answer_ids: &[i32]) -> Result<Vec<Recommendation>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .recommendations
            .values()
            .filter(|r| answer_ids.contains(&r.answer_id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BaseRepository<User> for InMemoryStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, draft: NewUser) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .values()
            .any(|u| u.username == draft.username || u.email == draft.email)
        {
            return Err(RepoError::Constraint(
                "username or email already registered".to_string(),
            ));
        }
        let id = tables.next_id("users");
        let user = draft.into_user(id);
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        tables.remove_user(id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.tables.read().await.users.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests;
