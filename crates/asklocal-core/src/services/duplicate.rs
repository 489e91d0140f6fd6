//! Duplicate detection: "does an equivalent record already exist".
//!
//! Equivalence is exact equality on every field except those named in the
//! ignore list (surrogate ids and generated timestamps).

use std::collections::BTreeMap;

use crate::domain::{Entity, FieldValue, Record};
use crate::error::RepoError;
use crate::ports::DuplicateLookup;

/// Fields ignored when comparing locations.
pub const LOCATION_IGNORE: &[&str] = &["id"];
/// Fields ignored when comparing answers: author, question, parent and body
/// must all match.
pub const ANSWER_IGNORE: &[&str] = &["id", "posted_at"];
/// Fields ignored when comparing recommendations.
pub const RECOMMENDATION_IGNORE: &[&str] = &["id"];

/// The comparable projection of a record.
pub fn comparable_fields<R: Record + ?Sized>(
    record: &R,
    ignore: &[&str],
) -> BTreeMap<&'static str, FieldValue> {
    record
        .fields()
        .into_iter()
        .filter(|(name, _)| !ignore.contains(name))
        .collect()
}

/// Whether `existing` is equivalent to `candidate` once ignored fields are
/// dropped from both.
pub fn is_equivalent<C, E>(candidate: &C, existing: &E, ignore: &[&str]) -> bool
where
    C: Record + ?Sized,
    E: Record + ?Sized,
{
    comparable_fields(candidate, ignore) == comparable_fields(existing, ignore)
}

/// Look up an existing row equivalent to `candidate`.
pub async fn find_duplicate<T, L>(
    lookup: &L,
    candidate: &T::Draft,
    ignore: &[&'static str],
) -> Result<Option<T>, RepoError>
where
    T: Entity,
    L: DuplicateLookup<T> + ?Sized,
{
    let found = lookup.find_equivalent(candidate, ignore).await?;
    if let Some(existing) = &found {
        tracing::debug!(entity = T::NAME, id = %existing.id(), "Equivalent record found");
    }
    Ok(found)
}
