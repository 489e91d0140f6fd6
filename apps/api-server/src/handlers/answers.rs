//! Answer and recommendation handlers.

use actix_web::{HttpResponse, web};

use asklocal_core::services::{EditOutcome, Posted, VoteAction, VoteOutcome};
use asklocal_shared::ApiResponse;
use asklocal_shared::dto::{EditBodyRequest, MessageResponse, PostAnswerRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/answers
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let answers = state.services.threads.list_answers().await?;

    Ok(HttpResponse::Ok().json(answers.iter().map(views::answer).collect::<Vec<_>>()))
}

/// POST /api/questions/{id}/answers
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<PostAnswerRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let posted = state
        .services
        .assembler
        .post_answer(identity.user_id, path.into_inner(), req.parent_id, req.body)
        .await?;

    Ok(match posted {
        Posted::Created(answer) => {
            HttpResponse::Created().json(ApiResponse::ok(views::answer(&answer)))
        }
        Posted::Duplicate(existing) => HttpResponse::Ok().json(ApiResponse::ok_with_message(
            views::answer(&existing),
            "An identical answer already exists.",
        )),
    })
}

/// GET /api/answers/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let details = state
        .services
        .threads
        .answer_details(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(views::answer_details(&details)))
}

/// PUT /api/answers/{id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<EditBodyRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .services
        .threads
        .edit_answer(identity.user_id, path.into_inner(), body.into_inner().body)
        .await?;

    let response = match outcome {
        EditOutcome::Updated(answer) => ApiResponse::ok(views::answer(&answer)),
        EditOutcome::NotModified(answer) => ApiResponse::ok_with_message(
            views::answer(&answer),
            "The answer was not modified.",
        ),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/answers/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let answer = state
        .services
        .threads
        .delete_answer(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Answer {} deleted.",
        answer.id
    ))))
}

/// POST /api/answers/{id}/{vote|remove-vote}
pub async fn vote(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i32, String)>,
) -> AppResult<HttpResponse> {
    let (answer_id, action) = path.into_inner();
    let action: VoteAction = action.parse()?;

    let outcome = state
        .services
        .threads
        .toggle_recommendation(identity.user_id, answer_id, action)
        .await?;

    Ok(match outcome {
        VoteOutcome::Recommended(_) => {
            HttpResponse::Created().json(MessageResponse::new("Answer recommended."))
        }
        VoteOutcome::AlreadyRecommended => HttpResponse::Ok().json(MessageResponse::new(
            "You have already recommended this answer.",
        )),
        VoteOutcome::Removed => {
            HttpResponse::Ok().json(MessageResponse::new("Recommendation removed."))
        }
        VoteOutcome::NothingToRemove => HttpResponse::Ok().json(MessageResponse::new(
            "You have not recommended this answer.",
        )),
    })
}
