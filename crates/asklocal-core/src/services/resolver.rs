//! Reference resolution: turn loosely-structured client input into validated
//! location and category references.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{Category, Location, NewLocation};
use crate::error::{DomainError, RepoError};
use crate::normalize;
use crate::ports::{CategoryRepository, CountryRepository, LocationRepository, Repositories};

use super::duplicate::{LOCATION_IGNORE, find_duplicate};

/// Policy knobs for reference resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverPolicy {
    /// Country whose locations come only from seed data. Request traffic may
    /// reuse them but never create new ones.
    pub closed_country_code: String,
}

impl ResolverPolicy {
    pub fn new(closed_country_code: &str) -> Self {
        Self {
            closed_country_code: normalize::country_code(closed_country_code),
        }
    }
}

impl Default for ResolverPolicy {
    fn default() -> Self {
        Self::new("AU")
    }
}

/// Client-supplied location: either `location_id` alone, or all four raw
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LocationInput {
    pub location_id: Option<i32>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub suburb: Option<String>,
}

impl LocationInput {
    pub fn by_id(location_id: i32) -> Self {
        Self {
            location_id: Some(location_id),
            ..Self::default()
        }
    }

    pub fn by_fields(country_code: &str, state: &str, postcode: &str, suburb: &str) -> Self {
        Self {
            location_id: None,
            country_code: Some(country_code.to_string()),
            state: Some(state.to_string()),
            postcode: Some(postcode.to_string()),
            suburb: Some(suburb.to_string()),
        }
    }

    fn into_spec(self) -> Result<LocationSpec, DomainError> {
        let raw = [
            ("country_code", present(self.country_code)),
            ("state", present(self.state)),
            ("postcode", present(self.postcode)),
            ("suburb", present(self.suburb)),
        ];
        let supplied = raw.iter().filter(|(_, v)| v.is_some()).count();

        match (self.location_id, supplied) {
            (Some(_), n) if n > 0 => Err(DomainError::validation(
                "Supply either a location_id or country_code, state, postcode and suburb, not both.",
            )),
            (Some(id), _) => Ok(LocationSpec::Existing(id)),
            (None, 0) => Err(DomainError::validation(
                "A location is required: supply a location_id or country_code, state, postcode and suburb.",
            )),
            (None, _) => {
                let missing: Vec<&str> = raw
                    .iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| *name)
                    .collect();
                let [code, state, postcode, suburb] = raw.map(|(_, v)| v);
                match (code, state, postcode, suburb) {
                    (Some(code), Some(state), Some(postcode), Some(suburb)) => {
                        Ok(LocationSpec::Fields(NewLocation {
                            country_code: normalize::country_code(&code),
                            state: normalize::title_case(&state),
                            postcode: normalize::title_case(&postcode),
                            suburb: normalize::title_case(&suburb),
                        }))
                    }
                    _ => Err(DomainError::validation(format!(
                        "Incomplete location, missing: {}.",
                        missing.join(", ")
                    ))),
                }
            }
        }
    }
}

/// Client-supplied category: exactly one of `category_id` or `category_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryInput {
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
}

impl CategoryInput {
    pub fn by_id(category_id: i32) -> Self {
        Self {
            category_id: Some(category_id),
            category_name: None,
        }
    }

    pub fn by_name(category_name: &str) -> Self {
        Self {
            category_id: None,
            category_name: Some(category_name.to_string()),
        }
    }
}

/// A resolved location reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationRef {
    pub id: i32,
    /// Whether resolution inserted a new row.
    pub created: bool,
}

/// A resolved category reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: i32,
}

enum LocationSpec {
    Existing(i32),
    Fields(NewLocation),
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolves location and category references against reference data.
#[derive(Clone)]
pub struct ReferenceResolver {
    countries: Arc<dyn CountryRepository>,
    categories: Arc<dyn CategoryRepository>,
    locations: Arc<dyn LocationRepository>,
    policy: ResolverPolicy,
}

impl ReferenceResolver {
    pub fn new(repos: &Repositories, policy: ResolverPolicy) -> Self {
        Self {
            countries: repos.countries.clone(),
            categories: repos.categories.clone(),
            locations: repos.locations.clone(),
            policy,
        }
    }

    pub fn policy(&self) -> &ResolverPolicy {
        &self.policy
    }

    /// Every category a question may be filed under.
    pub async fn categories(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.list().await?)
    }

    /// Resolve a location, creating it when the raw fields are new and the
    /// country is open to ad hoc locations.
    pub async fn resolve_location(&self, input: LocationInput) -> Result<LocationRef, DomainError> {
        match input.into_spec()? {
            LocationSpec::Existing(id) => {
                let location = self
                    .locations
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Location", id))?;
                Ok(LocationRef {
                    id: location.id,
                    created: false,
                })
            }
            LocationSpec::Fields(draft) => self.resolve_location_fields(draft).await,
        }
    }

    async fn resolve_location_fields(&self, draft: NewLocation) -> Result<LocationRef, DomainError> {
        if self
            .countries
            .find_by_code(&draft.country_code)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("Country", &draft.country_code));
        }

        if let Some(existing) = find_duplicate(&*self.locations, &draft, LOCATION_IGNORE).await? {
            return Ok(LocationRef {
                id: existing.id,
                created: false,
            });
        }

        if draft.country_code == self.policy.closed_country_code {
            tracing::debug!(
                country_code = %draft.country_code,
                postcode = %draft.postcode,
                suburb = %draft.suburb,
                "Refusing to create location in closed country"
            );
            return Err(DomainError::not_found(
                "Location",
                format!(
                    "{} {} {} {}",
                    draft.suburb, draft.state, draft.postcode, draft.country_code
                ),
            ));
        }

        self.insert_location(draft).await
    }

    /// Insert, treating a natural-key conflict as "duplicate found".
    async fn insert_location(&self, draft: NewLocation) -> Result<LocationRef, DomainError> {
        match self.locations.insert(draft.clone()).await {
            Ok(location) => {
                tracing::info!(
                    location_id = location.id,
                    country_code = %location.country_code,
                    "Location created"
                );
                Ok(LocationRef {
                    id: location.id,
                    created: true,
                })
            }
            Err(RepoError::Constraint(reason)) => {
                tracing::debug!(%reason, "Location insert conflicted, reusing existing row");
                let existing: Location = find_duplicate(&*self.locations, &draft, LOCATION_IGNORE)
                    .await?
                    .ok_or(DomainError::Conflict(reason))?;
                Ok(LocationRef {
                    id: existing.id,
                    created: false,
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve a category by id or by title-cased exact name.
    pub async fn resolve_category(&self, input: CategoryInput) -> Result<CategoryRef, DomainError> {
        let name = present(input.category_name);
        let category = match (input.category_id, name) {
            (Some(_), Some(_)) => {
                return Err(DomainError::validation(
                    "Supply either a category_id or a category_name, not both.",
                ));
            }
            (None, None) => {
                return Err(DomainError::validation(
                    "A category is required: supply a category_id or a category_name.",
                ));
            }
            (Some(id), None) => self
                .categories
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Category", id))?,
            (None, Some(name)) => {
                let name = normalize::title_case(&name);
                self.categories
                    .find_by_name(&name)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Category", name))?
            }
        };

        Ok(CategoryRef { id: category.id })
    }
}
