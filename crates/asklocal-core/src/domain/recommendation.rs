use serde::{Deserialize, Serialize};

use super::record::{Entity, FieldValue, Record};

/// A user's recommendation of an answer. At most one per (user, answer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: i32,
    pub user_id: i32,
    pub answer_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewRecommendation {
    pub user_id: i32,
    pub answer_id: i32,
}

impl NewRecommendation {
    pub fn into_recommendation(self, id: i32) -> Recommendation {
        Recommendation {
            id,
            user_id: self.user_id,
            answer_id: self.answer_id,
        }
    }
}

impl Record for NewRecommendation {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("user_id", FieldValue::Int(self.user_id)),
            ("answer_id", FieldValue::Int(self.answer_id)),
        ]
    }
}

impl Record for Recommendation {
    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        vec![
            ("id", FieldValue::Int(self.id)),
            ("user_id", FieldValue::Int(self.user_id)),
            ("answer_id", FieldValue::Int(self.answer_id)),
        ]
    }
}

impl Entity for Recommendation {
    type Id = i32;
    type Draft = NewRecommendation;
    const NAME: &'static str = "Recommendation";

    fn id(&self) -> i32 {
        self.id
    }
}
