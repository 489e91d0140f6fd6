//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to post a question.
///
/// The location is given either as `location_id` or as the four raw fields;
/// the category as `category_id` or `category_name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuestionRequest {
    pub location_id: Option<i32>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub suburb: Option<String>,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub body: Option<String>,
}

/// Request to answer a question, or to reply to an answer with `parent_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostAnswerRequest {
    pub body: Option<String>,
    pub parent_id: Option<i32>,
}

/// Request to replace the body of a question or answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditBodyRequest {
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: i32,
    pub author_id: i32,
    pub location_id: i32,
    pub category_id: i32,
    pub posted_at: DateTime<Utc>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub id: i32,
    pub author_id: i32,
    pub question_id: i32,
    pub parent_id: Option<i32>,
    pub posted_at: DateTime<Utc>,
    pub body: String,
}

/// One answer in a question's thread, with its replies nested beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerNode {
    #[serde(flatten)]
    pub answer: AnswerResponse,
    pub recommendations: usize,
    pub replies: Vec<AnswerNode>,
}

/// A question with its whole answer thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDetailResponse {
    #[serde(flatten)]
    pub question: QuestionResponse,
    pub answers: Vec<AnswerNode>,
}

/// An answer with its direct replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerDetailResponse {
    #[serde(flatten)]
    pub answer: AnswerResponse,
    pub recommendations: usize,
    pub replies: Vec<AnswerResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
}

/// Public user fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
