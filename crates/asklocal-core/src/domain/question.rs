use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Entity, FieldValue, Record};

/// A question about a place, filed under a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub author_id: i32,
    pub location_id: i32,
    pub category_id: i32,
    pub posted_at: DateTime<Utc>,
    pub body: String,
}

/// Insert draft for a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub author_id: i32,
    pub location_id: i32,
    pub category_id: i32,
    pub posted_at: DateTime<Utc>,
    pub body: String,
}

impl NewQuestion {
    /// Create a draft stamped with the current UTC time.
    pub fn new(author_id: i32, location_id: i32, category_id: i32, body: String) -> Self {
        Self {
            author_id,
            location_id,
            category_id,
            posted_at: Utc::now(),
            body,
        }
    }

    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            author_id: self.author_id,
            location_id: self.location_id,
            category_id: self.category_id,
            posted_at: self.posted_at,
            body: self.body,
        }
    }
}

impl Record for NewQuestion {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("author_id", FieldValue::Int(self.author_id)),
            ("location_id", FieldValue::Int(self.location_id)),
            ("category_id", FieldValue::Int(self.category_id)),
            ("posted_at", FieldValue::Timestamp(self.posted_at)),
            ("body", FieldValue::Text(self.body.clone())),
        ]
    }
}

impl Record for Question {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("author_id", FieldValue::Int(self.author_id)),
            ("location_id", FieldValue::Int(self.location_id)),
            ("category_id", FieldValue::Int(self.category_id)),
            ("posted_at", FieldValue::Timestamp(self.posted_at)),
            ("body", FieldValue::Text(self.body.clone())),
        ]
    }
}

impl Entity for Question {
    type Id = i32;
    type Draft = NewQuestion;
    const NAME: &'static str = "Question";

    fn id(&self) -> i32 {
        self.id
    }
}
