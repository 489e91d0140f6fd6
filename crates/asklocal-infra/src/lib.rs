//! # AskLocal Infrastructure
//!
//! Concrete implementations of the ports defined in `asklocal-core`.
//! This crate contains the in-memory and PostgreSQL stores and caller
//! identification.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM
//! - `auth` - JWT caller identification

pub mod database;
pub mod memory;
pub mod seed;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::DatabaseConfig;
pub use memory::InMemoryStore;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtIdentityProvider};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, postgres_repositories};
