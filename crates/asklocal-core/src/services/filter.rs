//! Filter query engine.
//!
//! Every legal filter key is routed through a static table to one column of
//! one of the five joined tables, with a normalization rule for its value.
//! Validation is all-or-nothing: a single unknown key rejects the request.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{FilterTarget, FilterValue, Predicate, Question, QuestionFilter};
use crate::error::DomainError;
use crate::normalize;
use crate::ports::{QuestionRepository, Repositories};

/// How a raw query value is normalized before matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Parsed as an integer id.
    Integer,
    TitleCase,
    UpperCase,
    Exact,
}

/// One row of the routing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub target: FilterTarget,
    pub column: &'static str,
    pub normalization: Normalization,
}

const fn field(
    key: &'static str,
    target: FilterTarget,
    column: &'static str,
    normalization: Normalization,
) -> FilterField {
    FilterField {
        key,
        target,
        column,
        normalization,
    }
}

/// The legal question filters.
pub const QUESTION_FILTERS: &[FilterField] = &[
    field("user_id", FilterTarget::Question, "author_id", Normalization::Integer),
    field("username", FilterTarget::User, "username", Normalization::Exact),
    field("category_id", FilterTarget::Question, "category_id", Normalization::Integer),
    field("category_name", FilterTarget::Category, "name", Normalization::TitleCase),
    field("location_id", FilterTarget::Question, "location_id", Normalization::Integer),
    field("country_code", FilterTarget::Location, "country_code", Normalization::UpperCase),
    field("country", FilterTarget::Country, "name", Normalization::TitleCase),
    field("state", FilterTarget::Location, "state", Normalization::TitleCase),
    field("postcode", FilterTarget::Location, "postcode", Normalization::Exact),
    field("suburb", FilterTarget::Location, "suburb", Normalization::TitleCase),
];

/// Columns each joined table exposes to filtering.
pub fn filterable_columns(target: FilterTarget) -> &'static [&'static str] {
    match target {
        FilterTarget::Question => &["id", "author_id", "location_id", "category_id"],
        FilterTarget::User => &["id", "username"],
        FilterTarget::Category => &["id", "name"],
        FilterTarget::Location => &["id", "country_code", "state", "postcode", "suburb"],
        FilterTarget::Country => &["code", "name"],
    }
}

/// Result of parsing query parameters against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPlan {
    Filter(QuestionFilter),
    /// A value can never match (e.g. a non-numeric id), so the store need not
    /// be asked.
    Unsatisfiable,
}

/// A validated routing table.
#[derive(Debug, Clone)]
pub struct FilterTable {
    fields: &'static [FilterField],
}

impl FilterTable {
    /// Validate a routing table: keys must be unique and every column must
    /// exist on its target table.
    pub fn new(fields: &'static [FilterField]) -> Result<Self, DomainError> {
        for (i, f) in fields.iter().enumerate() {
            if f.key.is_empty() {
                return Err(DomainError::Internal("filter key must not be empty".to_string()));
            }
            if fields[..i].iter().any(|other| other.key == f.key) {
                return Err(DomainError::Internal(format!(
                    "filter key '{}' is routed twice",
                    f.key
                )));
            }
            if !filterable_columns(f.target).contains(&f.column) {
                return Err(DomainError::Internal(format!(
                    "filter key '{}' routes to unknown column {:?}.{}",
                    f.key, f.target, f.column
                )));
            }
        }
        Ok(Self { fields })
    }

    /// The table for question queries.
    pub fn questions() -> Result<Self, DomainError> {
        Self::new(QUESTION_FILTERS)
    }

    pub fn legal_keys(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.key).collect()
    }

    fn lookup(&self, key: &str) -> Option<&FilterField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Parse raw key/value pairs. Any unknown key fails the whole request
    /// with an error naming every legal key.
    pub fn parse<'a, I>(&self, params: I) -> Result<FilterPlan, DomainError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut predicates = Vec::new();
        let mut unknown = Vec::new();
        let mut satisfiable = true;

        for (key, raw) in params {
            let Some(field) = self.lookup(key) else {
                unknown.push(key);
                continue;
            };
            let value = match field.normalization {
                Normalization::Integer => match raw.trim().parse::<i32>() {
                    Ok(id) => FilterValue::Int(id),
                    Err(_) => {
                        satisfiable = false;
                        continue;
                    }
                },
                Normalization::TitleCase => FilterValue::Text(normalize::title_case(raw)),
                Normalization::UpperCase => FilterValue::Text(normalize::country_code(raw)),
                Normalization::Exact => FilterValue::Text(raw.to_string()),
            };
            predicates.push(Predicate {
                target: field.target,
                column: field.column,
                value,
            });
        }

        if !unknown.is_empty() {
            tracing::debug!(unknown = ?unknown, "Rejected question filters");
            return Err(DomainError::validation(format!(
                "You can only filter questions using the following attributes: {}.",
                self.legal_keys().join(", ")
            )));
        }
        if !satisfiable {
            return Ok(FilterPlan::Unsatisfiable);
        }

        predicates.sort_by(|a, b| (a.target, a.column).cmp(&(b.target, b.column)));
        Ok(FilterPlan::Filter(QuestionFilter::new(predicates)))
    }
}

/// Outcome of a question query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Matches(Vec<Question>),
    Empty,
}

/// Validates filters and runs the composed join.
#[derive(Clone)]
pub struct FilterQueryEngine {
    table: FilterTable,
    questions: Arc<dyn QuestionRepository>,
}

impl FilterQueryEngine {
    pub fn new(repos: &Repositories, table: FilterTable) -> Self {
        Self {
            table,
            questions: repos.questions.clone(),
        }
    }

    pub fn table(&self) -> &FilterTable {
        &self.table
    }

    /// Run a question query from request parameters. No parameters returns
    /// every question.
    pub async fn query(&self, params: &HashMap<String, String>) -> Result<QueryOutcome, DomainError> {
        let plan = self
            .table
            .parse(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;

        let filter = match plan {
            FilterPlan::Filter(filter) => filter,
            FilterPlan::Unsatisfiable => return Ok(QueryOutcome::Empty),
        };

        let questions = self.questions.filter(&filter).await?;
        tracing::debug!(
            predicates = filter.predicates().len(),
            matches = questions.len(),
            "Question query executed"
        );

        if questions.is_empty() {
            Ok(QueryOutcome::Empty)
        } else {
            Ok(QueryOutcome::Matches(questions))
        }
    }

    /// Questions in a category given by id (all digits) or by name.
    pub async fn by_category(&self, id_or_name: &str) -> Result<QueryOutcome, DomainError> {
        let key = if !id_or_name.is_empty() && id_or_name.chars().all(|c| c.is_ascii_digit()) {
            "category_id"
        } else {
            "category_name"
        };
        let params = HashMap::from([(key.to_string(), id_or_name.to_string())]);
        self.query(&params).await
    }
}
