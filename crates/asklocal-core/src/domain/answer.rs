use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::record::{Entity, FieldValue, Record};

/// An answer to a question, or a reply to another answer when `parent_id`
/// is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: i32,
    pub author_id: i32,
    pub question_id: i32,
    pub parent_id: Option<i32>,
    pub posted_at: DateTime<Utc>,
    pub body: String,
}

/// Insert draft for an [`Answer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub author_id: i32,
    pub question_id: i32,
    pub parent_id: Option<i32>,
    pub posted_at: DateTime<Utc>,
    pub body: String,
}

impl NewAnswer {
    /// Create a draft stamped with the current UTC time.
    pub fn new(author_id: i32, question_id: i32, parent_id: Option<i32>, body: String) -> Self {
        Self {
            author_id,
            question_id,
            parent_id,
            posted_at: Utc::now(),
            body,
        }
    }

    pub fn into_answer(self, id: i32) -> Answer {
        Answer {
            id,
            author_id: self.author_id,
            question_id: self.question_id,
            parent_id: self.parent_id,
            posted_at: self.posted_at,
            body: self.body,
        }
    }
}

impl Record for NewAnswer {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("author_id", FieldValue::Int(self.author_id)),
            ("question_id", FieldValue::Int(self.question_id)),
            ("parent_id", FieldValue::OptionalInt(self.parent_id)),
            ("posted_at", FieldValue::Timestamp(self.posted_at)),
            ("body", FieldValue::Text(self.body.clone())),
        ]
    }
}

impl Record for Answer {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("author_id", FieldValue::Int(self.author_id)),
            ("question_id", FieldValue::Int(self.question_id)),
            ("parent_id", FieldValue::OptionalInt(self.parent_id)),
            ("posted_at", FieldValue::Timestamp(self.posted_at)),
            ("body", FieldValue::Text(self.body.clone())),
        ]
    }
}

impl Entity for Answer {
    type Id = i32;
    type Draft = NewAnswer;
    const NAME: &'static str = "Answer";

    fn id(&self) -> i32 {
        self.id
    }
}
