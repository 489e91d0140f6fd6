//! Route-level behaviour over the seeded in-memory store.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};

use asklocal_core::ports::Repositories;
use asklocal_infra::{InMemoryStore, JwtConfig, JwtIdentityProvider};

use super::configure_routes;
use crate::state::{AppState, StoreKind};

const SECRET: &str = "route-test-secret";
const ISSUER: &str = "asklocal-test";

fn state() -> AppState {
    let repos = Repositories::from_store(Arc::new(InMemoryStore::seeded()));
    let identity = Arc::new(JwtIdentityProvider::new(&JwtConfig {
        secret: SECRET.to_string(),
        issuer: ISSUER.to_string(),
    }));
    AppState::with_repositories(&repos, StoreKind::Memory, "AU", identity).unwrap()
}

fn bearer(user_id: i32) -> (&'static str, String) {
    let claims = json!({
        "sub": user_id.to_string(),
        "iss": ISSUER,
        "exp": chrono::Utc::now().timestamp() + 3600,
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    ("Authorization", format!("Bearer {token}"))
}

fn ultimo_question(body: &str) -> Value {
    json!({
        "country_code": "au",
        "state": "nsw",
        "postcode": "2007",
        "suburb": "ultimo",
        "category_name": "food & drink",
        "body": body,
    })
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health() {
    let app = app!();

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request())
        .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn test_unknown_filter_key_is_bad_request() {
    let app = app!();

    let req = test::TestRequest::get()
        .uri("/api/questions?city=Sydney")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("suburb"));
    assert!(detail.contains("category_name"));
}

#[actix_web::test]
async fn test_empty_query_is_not_found() {
    let app = app!();

    let req = test::TestRequest::get()
        .uri("/api/questions?suburb=nowhere")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "No matching questions were found.");
}

#[actix_web::test]
async fn test_posting_requires_a_token() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/questions")
        .set_json(ultimo_question("Where is the best dumpling house?"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_closed_country_location_is_not_found() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/questions")
        .insert_header(bearer(1))
        .set_json(json!({
            "country_code": "AU",
            "state": "NSW",
            "postcode": "2000",
            "suburb": "Sydney",
            "category_id": 1,
            "body": "Any quiet hotels near the harbour?",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_unknown_user_cannot_post() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/questions")
        .insert_header(bearer(999))
        .set_json(ultimo_question("Where is the closest late night pharmacy?"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get().uri("/api/questions").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_question_thread_flow() {
    let app = app!();

    // Post a question against the seeded Ultimo location.
    let req = test::TestRequest::post()
        .uri("/api/questions")
        .insert_header(bearer(1))
        .set_json(ultimo_question("Where is the best dumpling house?"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let question_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::get()
        .uri("/api/questions?suburb=ULTIMO&category_name=food%20%26%20drink")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Answer it, then post the same answer again.
    let answer = json!({"body": "Try the place on Harris Street near the TAFE."});
    let req = test::TestRequest::post()
        .uri(&format!("/api/questions/{question_id}/answers"))
        .insert_header(bearer(1))
        .set_json(&answer)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let answer_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/api/questions/{question_id}/answers"))
        .insert_header(bearer(1))
        .set_json(&answer)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["id"].as_i64().unwrap(), answer_id);
    assert!(body["message"].is_string());

    // Reply to the answer and recommend it.
    let req = test::TestRequest::post()
        .uri(&format!("/api/questions/{question_id}/answers"))
        .insert_header(bearer(2))
        .set_json(json!({"body": "Seconded, the pork buns are great.", "parent_id": answer_id}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/answers/{answer_id}/vote"))
        .insert_header(bearer(2))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CREATED
    );

    let req = test::TestRequest::post()
        .uri(&format!("/api/answers/{answer_id}/vote"))
        .insert_header(bearer(2))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/questions/{question_id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["answers"].as_array().unwrap().len(), 1);
    assert_eq!(body["answers"][0]["recommendations"], 1);
    assert_eq!(body["answers"][0]["replies"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_only_the_author_may_edit() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/questions")
        .insert_header(bearer(1))
        .set_json(ultimo_question("Which laundromat stays open late?"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let question_id = body["data"]["id"].as_i64().unwrap();

    let edit = json!({"body": "Which laundromat stays open past midnight?"});
    let req = test::TestRequest::put()
        .uri(&format!("/api/questions/{question_id}"))
        .insert_header(bearer(2))
        .set_json(&edit)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::put()
        .uri(&format!("/api/questions/{question_id}"))
        .insert_header(bearer(1))
        .set_json(&edit)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["body"], "Which laundromat stays open past midnight?");
    assert!(body.get("message").is_none());

    let req = test::TestRequest::put()
        .uri(&format!("/api/questions/{question_id}"))
        .insert_header(bearer(1))
        .set_json(&edit)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "The question was not modified.");
}

#[actix_web::test]
async fn test_unknown_vote_action_is_bad_request() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/answers/1/upvote")
        .insert_header(bearer(1))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_json_is_a_problem_document() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/questions")
        .insert_header(bearer(1))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn test_reference_listings() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/categories").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 11);

    let req = test::TestRequest::get().uri("/api/users").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["username"], "user1");
    assert!(body[0].get("email").is_none());

    let req = test::TestRequest::get()
        .uri("/api/categories/Housing/questions")
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn test_users_may_only_delete_themselves() {
    let app = app!();

    let req = test::TestRequest::delete()
        .uri("/api/users/1")
        .insert_header(bearer(2))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::delete()
        .uri("/api/users/1")
        .insert_header(bearer(1))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
