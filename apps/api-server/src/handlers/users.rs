//! User handlers.

use actix_web::{HttpResponse, web};

use asklocal_shared::dto::MessageResponse;

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/users
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.services.users.list().await?;

    Ok(HttpResponse::Ok().json(users.iter().map(views::user).collect::<Vec<_>>()))
}

/// DELETE /api/users/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let user = state
        .services
        .users
        .delete_user(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "User {} deleted.",
        user.username
    ))))
}
