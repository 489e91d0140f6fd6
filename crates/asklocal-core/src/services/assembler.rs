//! Record assembly: build validated questions and answers from resolved
//! references.

use std::sync::Arc;

use crate::domain::{Answer, MIN_BODY_CHARS, NewAnswer, NewQuestion, Question};
use crate::error::DomainError;
use crate::normalize;
use crate::ports::{AnswerRepository, QuestionRepository, Repositories};

use super::duplicate::{ANSWER_IGNORE, find_duplicate};
use super::resolver::{CategoryInput, LocationInput, ReferenceResolver};

/// Everything needed to post a question, before resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuestion {
    pub location: LocationInput,
    pub category: CategoryInput,
    pub body: Option<String>,
}

/// Outcome of a post that may find an identical record already stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Posted<T> {
    Created(T),
    Duplicate(T),
}

impl<T> Posted<T> {
    pub fn record(&self) -> &T {
        match self {
            Self::Created(record) | Self::Duplicate(record) => record,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Created(record) | Self::Duplicate(record) => record,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Check a question or answer body: present and at least
/// [`MIN_BODY_CHARS`] characters long.
pub fn validate_body(body: Option<String>) -> Result<String, DomainError> {
    match body {
        Some(body) if normalize::char_len(&body) >= MIN_BODY_CHARS => Ok(body),
        Some(_) => Err(DomainError::validation(format!(
            "The body must be at least {MIN_BODY_CHARS} characters long."
        ))),
        None => Err(DomainError::validation("A body is required.")),
    }
}

/// Builds and stores questions and answers.
#[derive(Clone)]
pub struct RecordAssembler {
    resolver: ReferenceResolver,
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
}

impl RecordAssembler {
    pub fn new(repos: &Repositories, resolver: ReferenceResolver) -> Self {
        Self {
            resolver,
            questions: repos.questions.clone(),
            answers: repos.answers.clone(),
        }
    }

    /// Validate, resolve references and store a new question.
    ///
    /// The body is checked before any reference is resolved, and the category
    /// before the location, so a rejected post never creates a location.
    pub async fn post_question(
        &self,
        author_id: i32,
        request: PostQuestion,
    ) -> Result<Question, DomainError> {
        let body = validate_body(request.body)?;
        let category = self.resolver.resolve_category(request.category).await?;
        let location = self.resolver.resolve_location(request.location).await?;

        let question = self
            .questions
            .insert(NewQuestion::new(author_id, location.id, category.id, body))
            .await?;

        tracing::info!(
            question_id = question.id,
            author_id,
            location_id = location.id,
            category_id = category.id,
            "Question posted"
        );
        Ok(question)
    }

    /// Store an answer, or return the identical one already posted.
    pub async fn post_answer(
        &self,
        author_id: i32,
        question_id: i32,
        parent_id: Option<i32>,
        body: Option<String>,
    ) -> Result<Posted<Answer>, DomainError> {
        let body = validate_body(body)?;

        if self.questions.find_by_id(question_id).await?.is_none() {
            return Err(DomainError::not_found("Question", question_id));
        }

        if let Some(parent_id) = parent_id {
            let parent = self
                .answers
                .find_by_id(parent_id)
                .await?
                .ok_or_else(|| DomainError::not_found("Answer", parent_id))?;
            if parent.question_id != question_id {
                return Err(DomainError::validation(format!(
                    "Answer {parent_id} belongs to another question."
                )));
            }
        }

        let draft = NewAnswer::new(author_id, question_id, parent_id, body);
        if let Some(existing) = find_duplicate(&*self.answers, &draft, ANSWER_IGNORE).await? {
            return Ok(Posted::Duplicate(existing));
        }

        let answer = self.answers.insert(draft).await?;
        tracing::info!(
            answer_id = answer.id,
            question_id,
            parent_id = ?parent_id,
            author_id,
            "Answer posted"
        );
        Ok(Posted::Created(answer))
    }
}
