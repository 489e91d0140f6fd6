//! Field-level view of records, used for natural-key comparison.

use std::fmt::Display;

use chrono::{DateTime, Utc};

/// A single column value as seen by the duplicate detector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i32),
    OptionalInt(Option<i32>),
    Text(String),
    Timestamp(DateTime<Utc>),
}

/// A record that can list its fields by column name.
///
/// Both persisted rows and their insert drafts implement this so a draft can
/// be compared against stored rows field by field.
pub trait Record {
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;
}

/// A persisted entity with a surrogate id and an insert draft.
pub trait Entity: Record + Clone + Send + Sync + 'static {
    type Id: Copy + Send + Sync + Display + 'static;
    type Draft: Record + Send + Sync + 'static;

    /// Human-readable entity name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> Self::Id;
}
