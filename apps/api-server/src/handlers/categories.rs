//! Category handlers.

use actix_web::{HttpResponse, web};

use super::questions::query_response;
use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.services.resolver.categories().await?;

    Ok(HttpResponse::Ok().json(categories.iter().map(views::category).collect::<Vec<_>>()))
}

/// GET /api/categories/{id_or_name}/questions
pub async fn questions(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let outcome = state.services.queries.by_category(&path).await?;
    query_response(outcome)
}
