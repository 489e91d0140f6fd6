//! Thread and recommendation engine: answer threads, the per-user
//! recommendation toggle, and author-only edit/delete.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::{Answer, NewRecommendation, Question, Recommendation};
use crate::error::{DomainError, RepoError};
use crate::ports::{AnswerRepository, QuestionRepository, RecommendationRepository, Repositories};

use super::assembler::validate_body;
use super::duplicate::{RECOMMENDATION_IGNORE, find_duplicate};
use super::tree::AnswerThread;

/// Recommendation toggle direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Vote,
    RemoveVote,
}

impl FromStr for VoteAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vote" => Ok(Self::Vote),
            "remove-vote" => Ok(Self::RemoveVote),
            other => Err(DomainError::validation(format!(
                "Unknown vote action '{other}': use 'vote' or 'remove-vote'."
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
    Recommended(Recommendation),
    AlreadyRecommended,
    Removed,
    NothingToRemove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome<T> {
    Updated(T),
    /// The new body equals the stored one; nothing was written.
    NotModified(T),
}

/// A question with its whole answer thread.
#[derive(Debug, Clone)]
pub struct QuestionDetails {
    pub question: Question,
    pub thread: AnswerThread,
    /// Recommendation count per answer id. Absent means zero.
    pub recommendations: HashMap<i32, usize>,
}

impl QuestionDetails {
    pub fn recommendations_for(&self, answer_id: i32) -> usize {
        self.recommendations.get(&answer_id).copied().unwrap_or(0)
    }
}

/// An answer with its direct replies.
#[derive(Debug, Clone)]
pub struct AnswerDetails {
    pub answer: Answer,
    pub replies: Vec<Answer>,
    pub recommendations: usize,
}

fn ensure_author(
    owner_id: i32,
    caller_id: i32,
    action: &'static str,
    entity: &'static str,
) -> Result<(), DomainError> {
    if owner_id == caller_id {
        Ok(())
    } else {
        Err(DomainError::Authorization { action, entity })
    }
}

#[derive(Clone)]
pub struct ThreadEngine {
    questions: Arc<dyn QuestionRepository>,
    answers: Arc<dyn AnswerRepository>,
    recommendations: Arc<dyn RecommendationRepository>,
}

impl ThreadEngine {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            questions: repos.questions.clone(),
            answers: repos.answers.clone(),
            recommendations: repos.recommendations.clone(),
        }
    }

    async fn question(&self, id: i32) -> Result<Question, DomainError> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Question", id))
    }

    async fn answer(&self, id: i32) -> Result<Answer, DomainError> {
        self.answers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Answer", id))
    }

    async fn recommendation_counts(&self, answer_ids: &[i32]) -> Result<HashMap<i32, usize>, DomainError> {
        if answer_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let mut counts = HashMap::new();
        for rec in self.recommendations.find_by_answers(answer_ids).await? {
            *counts.entry(rec.answer_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    pub async fn question_details(&self, id: i32) -> Result<QuestionDetails, DomainError> {
        let question = self.question(id).await?;
        let thread = AnswerThread::build(self.answers.find_by_question(id).await?);
        let ids: Vec<i32> = thread.walk().iter().map(|(_, a)| a.id).collect();
        let recommendations = self.recommendation_counts(&ids).await?;
        Ok(QuestionDetails {
            question,
            thread,
            recommendations,
        })
    }

    pub async fn answer_details(&self, id: i32) -> Result<AnswerDetails, DomainError> {
        let answer = self.answer(id).await?;
        let thread = AnswerThread::build(self.answers.find_by_question(answer.question_id).await?);
        let replies: Vec<Answer> = thread.replies(id).cloned().collect();
        let recommendations = self
            .recommendation_counts(&[id])
            .await?
            .get(&id)
            .copied()
            .unwrap_or(0);
        Ok(AnswerDetails {
            answer,
            replies,
            recommendations,
        })
    }

    pub async fn list_answers(&self) -> Result<Vec<Answer>, DomainError> {
        Ok(self.answers.list().await?)
    }

    /// Cast or withdraw the caller's recommendation of an answer.
    pub async fn toggle_recommendation(
        &self,
        user_id: i32,
        answer_id: i32,
        action: VoteAction,
    ) -> Result<VoteOutcome, DomainError> {
        self.answer(answer_id).await?;
        let draft = NewRecommendation { user_id, answer_id };
        let existing = find_duplicate(&*self.recommendations, &draft, RECOMMENDATION_IGNORE).await?;

        match (action, existing) {
            (VoteAction::Vote, Some(_)) => Ok(VoteOutcome::AlreadyRecommended),
            (VoteAction::Vote, None) => match self.recommendations.insert(draft).await {
                Ok(rec) => {
                    tracing::info!(user_id, answer_id, "Answer recommended");
                    Ok(VoteOutcome::Recommended(rec))
                }
                Err(RepoError::Constraint(reason)) => {
                    tracing::debug!(%reason, "Recommendation insert conflicted");
                    find_duplicate(&*self.recommendations, &draft, RECOMMENDATION_IGNORE)
                        .await?
                        .map(|_| VoteOutcome::AlreadyRecommended)
                        .ok_or(DomainError::Conflict(reason))
                }
                Err(e) => Err(e.into()),
            },
            (VoteAction::RemoveVote, None) => Ok(VoteOutcome::NothingToRemove),
            (VoteAction::RemoveVote, Some(rec)) => {
                ensure_author(rec.user_id, user_id, "remove", "recommendation")?;
                self.recommendations.delete(rec.id).await?;
                tracing::info!(user_id, answer_id, "Recommendation removed");
                Ok(VoteOutcome::Removed)
            }
        }
    }

    pub async fn edit_question(
        &self,
        caller_id: i32,
        id: i32,
        body: Option<String>,
    ) -> Result<EditOutcome<Question>, DomainError> {
        let question = self.question(id).await?;
        ensure_author(question.author_id, caller_id, "edit", "question")?;
        let body = validate_body(body)?;
        if body == question.body {
            return Ok(EditOutcome::NotModified(question));
        }
        let updated = self.questions.update_body(id, body).await?;
        tracing::info!(question_id = id, "Question edited");
        Ok(EditOutcome::Updated(updated))
    }

    /// Delete a question and, with it, its answers.
    pub async fn delete_question(&self, caller_id: i32, id: i32) -> Result<Question, DomainError> {
        let question = self.question(id).await?;
        ensure_author(question.author_id, caller_id, "delete", "question")?;
        self.questions.delete(id).await?;
        tracing::info!(question_id = id, "Question deleted");
        Ok(question)
    }

    pub async fn edit_answer(
        &self,
        caller_id: i32,
        id: i32,
        body: Option<String>,
    ) -> Result<EditOutcome<Answer>, DomainError> {
        let answer = self.answer(id).await?;
        ensure_author(answer.author_id, caller_id, "edit", "answer")?;
        let body = validate_body(body)?;
        if body == answer.body {
            return Ok(EditOutcome::NotModified(answer));
        }
        let updated = self.answers.update_body(id, body).await?;
        tracing::info!(answer_id = id, "Answer edited");
        Ok(EditOutcome::Updated(updated))
    }

    /// Delete an answer and every reply beneath it.
    pub async fn delete_answer(&self, caller_id: i32, id: i32) -> Result<Answer, DomainError> {
        let answer = self.answer(id).await?;
        ensure_author(answer.author_id, caller_id, "delete", "answer")?;
        self.answers.delete(id).await?;
        tracing::info!(answer_id = id, question_id = answer.question_id, "Answer deleted");
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_action_parsing() {
        assert_eq!("vote".parse::<VoteAction>().unwrap(), VoteAction::Vote);
        assert_eq!(
            "remove-vote".parse::<VoteAction>().unwrap(),
            VoteAction::RemoveVote
        );
        assert!("upvote".parse::<VoteAction>().is_err());
    }

    #[test]
    fn test_only_the_author_passes() {
        assert!(ensure_author(4, 4, "edit", "answer").is_ok());
        let err = ensure_author(4, 5, "edit", "answer").unwrap_err();
        assert_eq!(err.to_string(), "You are not allowed to edit this answer");
    }
}
