//! Database connection management and the PostgreSQL store.

mod connections;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use postgres_base::PostgresBaseRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::{
    PostgresAnswerRepository, PostgresCategoryRepository, PostgresCountryRepository,
    PostgresLocationRepository, PostgresQuestionRepository, PostgresRecommendationRepository,
    PostgresUserRepository, postgres_repositories,
};
