//! Domain to wire conversions.

use asklocal_core::domain::{Answer, Category, Question, User};
use asklocal_core::services::{AnswerDetails, QuestionDetails};
use asklocal_shared::dto::{
    AnswerDetailResponse, AnswerNode, AnswerResponse, CategoryResponse, QuestionDetailResponse,
    QuestionResponse, UserResponse,
};

pub fn question(q: &Question) -> QuestionResponse {
    QuestionResponse {
        id: q.id,
        author_id: q.author_id,
        location_id: q.location_id,
        category_id: q.category_id,
        posted_at: q.posted_at,
        body: q.body.clone(),
    }
}

pub fn answer(a: &Answer) -> AnswerResponse {
    AnswerResponse {
        id: a.id,
        author_id: a.author_id,
        question_id: a.question_id,
        parent_id: a.parent_id,
        posted_at: a.posted_at,
        body: a.body.clone(),
    }
}

pub fn category(c: &Category) -> CategoryResponse {
    CategoryResponse {
        id: c.id,
        name: c.name.clone(),
        description: c.description.clone(),
    }
}

pub fn user(u: &User) -> UserResponse {
    UserResponse {
        id: u.id,
        username: u.username.clone(),
    }
}

fn node(details: &QuestionDetails, a: &Answer) -> AnswerNode {
    AnswerNode {
        answer: answer(a),
        recommendations: details.recommendations_for(a.id),
        replies: details
            .thread
            .replies(a.id)
            .map(|reply| node(details, reply))
            .collect(),
    }
}

/// A question with its answers nested by reply.
pub fn question_details(details: &QuestionDetails) -> QuestionDetailResponse {
    QuestionDetailResponse {
        question: question(&details.question),
        answers: details
            .thread
            .roots()
            .map(|root| node(details, root))
            .collect(),
    }
}

pub fn answer_details(details: &AnswerDetails) -> AnswerDetailResponse {
    AnswerDetailResponse {
        answer: answer(&details.answer),
        recommendations: details.recommendations,
        replies: details.replies.iter().map(answer).collect(),
    }
}
