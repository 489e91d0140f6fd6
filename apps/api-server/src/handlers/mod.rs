//! HTTP handlers and route configuration.

mod answers;
mod categories;
mod health;
mod questions;
mod users;
mod views;

#[cfg(test)]
mod tests;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config()).service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/categories", web::get().to(categories::list))
            .route(
                "/categories/{id_or_name}/questions",
                web::get().to(categories::questions),
            )
            .route("/users", web::get().to(users::list))
            .route("/answers", web::get().to(answers::list))
            // Routes mixing public reads and authenticated writes
            .service(
                web::resource("/questions")
                    .route(web::get().to(questions::query))
                    .route(web::post().to(questions::create)),
            )
            .service(
                web::resource("/questions/{id}")
                    .route(web::get().to(questions::get))
                    .route(web::put().to(questions::edit))
                    .route(web::delete().to(questions::delete)),
            )
            .route("/questions/{id}/answers", web::post().to(answers::create))
            .service(
                web::resource("/answers/{id}")
                    .route(web::get().to(answers::get))
                    .route(web::put().to(answers::edit))
                    .route(web::delete().to(answers::delete)),
            )
            .route("/answers/{id}/{action}", web::post().to(answers::vote))
            .route("/users/{id}", web::delete().to(users::delete)),
    );
}

/// Malformed JSON bodies become problem documents instead of plain text.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
