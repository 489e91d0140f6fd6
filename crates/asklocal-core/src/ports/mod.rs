//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod identity;
mod repository;

use std::sync::Arc;

pub use identity::{AuthError, Caller, IdentityProvider};
pub use repository::{
    AnswerRepository, BaseRepository, CategoryRepository, CountryRepository, DuplicateLookup,
    LocationRepository, QuestionRepository, RecommendationRepository, UserRepository,
};

/// Handles to every repository the services need.
///
/// A single store usually backs all of them.
#[derive(Clone)]
pub struct Repositories {
    pub countries: Arc<dyn CountryRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub recommendations: Arc<dyn RecommendationRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Use one store for every repository.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: CountryRepository
            + CategoryRepository
            + LocationRepository
            + QuestionRepository
            + AnswerRepository
            + RecommendationRepository
            + UserRepository
            + 'static,
    {
        Self {
            countries: store.clone(),
            categories: store.clone(),
            locations: store.clone(),
            questions: store.clone(),
            answers: store.clone(),
            recommendations: store.clone(),
            users: store,
        }
    }
}
