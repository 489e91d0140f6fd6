//! Question handlers.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};

use asklocal_core::services::{
    CategoryInput, EditOutcome, LocationInput, PostQuestion, QueryOutcome,
};
use asklocal_shared::ApiResponse;
use asklocal_shared::dto::{EditBodyRequest, MessageResponse, PostQuestionRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub(super) const NO_MATCHES: &str = "No matching questions were found.";

/// Shared by the question query and the per-category listing.
pub(super) fn query_response(outcome: QueryOutcome) -> AppResult<HttpResponse> {
    match outcome {
        QueryOutcome::Matches(questions) => Ok(HttpResponse::Ok()
            .json(questions.iter().map(views::question).collect::<Vec<_>>())),
        QueryOutcome::Empty => Err(AppError::NotFound(NO_MATCHES.to_string())),
    }
}

/// GET /api/questions?<filters>
pub async fn query(
    state: web::Data<AppState>,
    params: web::Query<HashMap<String, String>>,
) -> AppResult<HttpResponse> {
    let outcome = state.services.queries.query(&params).await?;
    query_response(outcome)
}

/// POST /api/questions
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostQuestionRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let request = PostQuestion {
        location: LocationInput {
            location_id: req.location_id,
            country_code: req.country_code,
            state: req.state,
            postcode: req.postcode,
            suburb: req.suburb,
        },
        category: CategoryInput {
            category_id: req.category_id,
            category_name: req.category_name,
        },
        body: req.body,
    };

    let question = state
        .services
        .assembler
        .post_question(identity.user_id, request)
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(views::question(&question))))
}

/// GET /api/questions/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<i32>) -> AppResult<HttpResponse> {
    let details = state
        .services
        .threads
        .question_details(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(views::question_details(&details)))
}

/// PUT /api/questions/{id}
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
    body: web::Json<EditBodyRequest>,
) -> AppResult<HttpResponse> {
    let outcome = state
        .services
        .threads
        .edit_question(identity.user_id, path.into_inner(), body.into_inner().body)
        .await?;

    let response = match outcome {
        EditOutcome::Updated(question) => ApiResponse::ok(views::question(&question)),
        EditOutcome::NotModified(question) => ApiResponse::ok_with_message(
            views::question(&question),
            "The question was not modified.",
        ),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /api/questions/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let question = state
        .services
        .threads
        .delete_question(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Question {} deleted.",
        question.id
    ))))
}
