#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test,
};
use chrono::Duration;
use serde_json::json;
use taskvault::{
    auth::{PasswordHasher, TokenService},
    models::{LoginResponse, UserResponse},
    store::MemoryStore,
    AppState,
};
use uuid::Uuid;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789abcdef";

/// Fresh in-memory state with the cheapest bcrypt cost.
pub fn test_state() -> AppState {
    let store = Arc::new(MemoryStore::new());
    AppState::new(
        store.clone(),
        store,
        PasswordHasher::new(4).expect("cost 4 is valid"),
        TokenService::new(TEST_SECRET, Duration::minutes(60)),
    )
}

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> TestUser
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "registration of {} failed", email);
    let user: UserResponse = test::read_body_json(resp).await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::OK, "login of {} failed", email);
    let login: LoginResponse = test::read_body_json(resp).await;

    TestUser {
        id: user.id,
        email: login.email,
        token: login.access_token,
    }
}
