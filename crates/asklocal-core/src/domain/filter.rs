//! Validated question filters, partitioned by the table they constrain.

use super::record::{FieldValue, Record};

/// The five tables a question query joins across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterTarget {
    Question,
    User,
    Category,
    Location,
    Country,
}

/// A normalized filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Int(i32),
    Text(String),
}

impl FilterValue {
    /// Exact equality against a stored field.
    pub fn matches(&self, field: &FieldValue) -> bool {
        match (self, field) {
            (Self::Int(wanted), FieldValue::Int(actual)) => wanted == actual,
            (Self::Int(wanted), FieldValue::OptionalInt(actual)) => Some(*wanted) == *actual,
            (Self::Text(wanted), FieldValue::Text(actual)) => wanted == actual,
            _ => false,
        }
    }
}

/// One equality predicate on a column of a joined table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub target: FilterTarget,
    pub column: &'static str,
    pub value: FilterValue,
}

impl Predicate {
    /// Evaluate the predicate against a record of the matching table.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        record
            .fields()
            .iter()
            .find(|(name, _)| *name == self.column)
            .is_some_and(|(_, value)| self.value.matches(value))
    }
}

/// A validated set of equality predicates over the question join.
///
/// An empty filter matches every question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    predicates: Vec<Predicate>,
}

impl QuestionFilter {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn for_target(&self, target: FilterTarget) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter().filter(move |p| p.target == target)
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether every predicate for `target` holds for `record`.
    pub fn accepts<R: Record + ?Sized>(&self, target: FilterTarget, record: &R) -> bool {
        self.for_target(target).all(|p| p.matches(record))
    }
}
