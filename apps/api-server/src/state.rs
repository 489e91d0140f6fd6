//! Application state - shared across all handlers.

use std::sync::Arc;

use serde::Serialize;

use asklocal_core::DomainError;
use asklocal_core::ports::{IdentityProvider, Repositories};
use asklocal_core::services::{ResolverPolicy, Services};
use asklocal_infra::{InMemoryStore, JwtIdentityProvider};

#[cfg(feature = "postgres")]
use asklocal_infra::{DatabaseConnections, postgres_repositories};

use crate::config::AppConfig;

/// Which store backs the repositories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Postgres,
    Memory,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub identity: Arc<dyn IdentityProvider>,
    pub store: StoreKind,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Fails if the filter routing table is malformed.
    pub async fn new(config: &AppConfig) -> Result<Self, DomainError> {
        let (repos, store) = connect(config).await;
        let identity = Arc::new(JwtIdentityProvider::new(&config.jwt));

        let state = Self::with_repositories(&repos, store, &config.home_country_code, identity)?;
        tracing::info!(
            store = ?store,
            home_country = %config.home_country_code,
            "Application state initialized"
        );
        Ok(state)
    }

    pub fn with_repositories(
        repos: &Repositories,
        store: StoreKind,
        home_country_code: &str,
        identity: Arc<dyn IdentityProvider>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            services: Services::new(repos, ResolverPolicy::new(home_country_code))?,
            identity,
            store,
        })
    }
}

fn in_memory() -> (Repositories, StoreKind) {
    let store = Arc::new(InMemoryStore::seeded());
    (Repositories::from_store(store), StoreKind::Memory)
}

#[cfg(feature = "postgres")]
async fn connect(config: &AppConfig) -> (Repositories, StoreKind) {
    let Some(db_config) = config.database.as_ref() else {
        tracing::warn!("DATABASE_URL not set. Running on the seeded in-memory store.");
        return in_memory();
    };

    match DatabaseConnections::init(db_config).await {
        Ok(connections) => (postgres_repositories(connections.main), StoreKind::Postgres),
        Err(e) => {
            tracing::error!(
                "Failed to connect to database: {}. Using in-memory fallback.",
                e
            );
            in_memory()
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn connect(_config: &AppConfig) -> (Repositories, StoreKind) {
    tracing::info!("Running without postgres feature - using in-memory store");
    in_memory()
}
