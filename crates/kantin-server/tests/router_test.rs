//! Router-level tests: middleware composition, status-code mapping,
//! and the privilege-escalation guard, driven through `tower::oneshot`
//! against an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use kantin_auth::config::AuthConfig;
use kantin_auth::token;
use kantin_core::models::school::{CreateSchool, School};
use kantin_core::models::user::{CreateUser, Role, User};
use kantin_core::repository::{SchoolRepository, UserRepository};
use kantin_db::{DbConfig, DbManager};
use kantin_server::routes;
use kantin_server::state::AppState;
use serde_json::json;
use tower::ServiceExt;

const TEST_SECRET: &str = "router-test-secret";

async fn test_state() -> AppState {
    let manager = DbManager::connect(&DbConfig::default()).await.unwrap();
    kantin_db::run_migrations(manager.client()).await.unwrap();
    AppState::new(
        manager.client().clone(),
        AuthConfig::for_tests(TEST_SECRET),
    )
}

async fn seed_user(state: &AppState, email: &str, role: Role) -> User {
    state
        .users
        .create(CreateUser {
            full_name: "Seeded User".into(),
            email: email.into(),
            password_hash: "$2b$04$0123456789012345678901uCsFqGmZUxVzYHboAECErT9X3kTW4fa".into(),
            role,
            nfc_tag_id: None,
            school_id: None,
        })
        .await
        .unwrap()
}

async fn seed_school(state: &AppState) -> School {
    state
        .schools
        .create(CreateSchool {
            name: "SDN 01".into(),
            address: "Jl. Merdeka No. 1".into(),
        })
        .await
        .unwrap()
}

fn bearer(user: &User) -> String {
    let token = token::issue_session_token(user, &AuthConfig::for_tests(TEST_SECRET)).unwrap();
    format!("Bearer {token}")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_as(uri: &str, auth: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", auth)
        .body(Body::empty())
        .unwrap()
}

async fn status(app: &Router, req: Request<Body>) -> StatusCode {
    app.clone().oneshot(req).await.unwrap().status()
}

#[tokio::test]
async fn health_is_public() {
    let app = routes::app(test_state().await);
    assert_eq!(status(&app, get("/health")).await, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = routes::app(test_state().await);
    assert_eq!(
        status(&app, get("/v1/nonexistent")).await,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn profile_without_token_is_401() {
    let app = routes::app(test_state().await);
    assert_eq!(
        status(&app, get("/v1/auth/me")).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn profile_with_valid_token_is_200() {
    let state = test_state().await;
    let user = seed_user(&state, "alice@example.com", Role::Student).await;
    let app = routes::app(state);

    assert_eq!(
        status(&app, get_as("/v1/auth/me", &bearer(&user))).await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn user_list_requires_a_staff_role() {
    let state = test_state().await;
    let student = seed_user(&state, "student@example.com", Role::Student).await;
    let admin = seed_user(&state, "admin@example.com", Role::Admin).await;
    let app = routes::app(state);

    assert_eq!(
        status(&app, get_as("/v1/users", &bearer(&student))).await,
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        status(&app, get_as("/v1/users", &bearer(&admin))).await,
        StatusCode::OK
    );
}

#[tokio::test]
async fn user_list_without_token_is_401_not_403() {
    // Authentication is checked before authorization.
    let app = routes::app(test_state().await);
    assert_eq!(
        status(&app, get("/v1/users")).await,
        StatusCode::UNAUTHORIZED
    );
}

#[tokio::test]
async fn admin_cannot_delete_a_super_admin() {
    let state = test_state().await;
    let admin = seed_user(&state, "admin@example.com", Role::Admin).await;
    let root = seed_user(&state, "root@example.com", Role::SuperAdmin).await;
    let app = routes::app(state);

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/users/{}", root.id))
        .header("authorization", bearer(&admin))
        .body(Body::empty())
        .unwrap();
    assert_eq!(status(&app, req).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn super_admin_can_delete_a_super_admin() {
    let state = test_state().await;
    let root = seed_user(&state, "root@example.com", Role::SuperAdmin).await;
    let other = seed_user(&state, "other-root@example.com", Role::SuperAdmin).await;
    let app = routes::app(state);

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/users/{}", other.id))
        .header("authorization", bearer(&root))
        .body(Body::empty())
        .unwrap();
    assert_eq!(status(&app, req).await, StatusCode::OK);
}

#[tokio::test]
async fn super_admin_creation_route_is_super_admin_only() {
    let state = test_state().await;
    let admin = seed_user(&state, "admin@example.com", Role::Admin).await;
    let app = routes::app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/v1/users/superadmin")
        .header("authorization", bearer(&admin))
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "full_name": "New Root",
                "email": "new-root@example.com",
                "password": "password123"
            })
            .to_string(),
        ))
        .unwrap();
    assert_eq!(status(&app, req).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn attendance_sync_requires_an_api_key() {
    let state = test_state().await;
    let school = seed_school(&state).await;
    let app = routes::app(state);

    let body = json!({
        "logs": [{ "nfc_tag_id": "04:A1:B2", "timestamp": "2025-09-03T07:30:00Z" }]
    })
    .to_string();

    let no_key = Request::builder()
        .method("POST")
        .uri("/v1/attendance/sync")
        .header("content-type", "application/json")
        .body(Body::from(body.clone()))
        .unwrap();
    assert_eq!(status(&app, no_key).await, StatusCode::UNAUTHORIZED);

    let bad_key = Request::builder()
        .method("POST")
        .uri("/v1/attendance/sync")
        .header("content-type", "application/json")
        .header("x-api-key", "bogus")
        .body(Body::from(body.clone()))
        .unwrap();
    assert_eq!(status(&app, bad_key).await, StatusCode::UNAUTHORIZED);

    let good_key = Request::builder()
        .method("POST")
        .uri("/v1/attendance/sync")
        .header("content-type", "application/json")
        .header("x-api-key", school.api_key)
        .body(Body::from(body))
        .unwrap();
    assert_eq!(status(&app, good_key).await, StatusCode::ACCEPTED);
}

#[tokio::test]
async fn attendance_sync_rejects_a_session_token() {
    // Session and device authentication are mutually exclusive per
    // route; a bearer token is no substitute for the API key.
    let state = test_state().await;
    let admin = seed_user(&state, "admin@example.com", Role::Admin).await;
    let app = routes::app(state);

    let req = Request::builder()
        .method("POST")
        .uri("/v1/attendance/sync")
        .header("content-type", "application/json")
        .header("authorization", bearer(&admin))
        .body(Body::from(
            json!({
                "logs": [{ "nfc_tag_id": "04:A1:B2", "timestamp": "2025-09-03T07:30:00Z" }]
            })
            .to_string(),
        ))
        .unwrap();
    assert_eq!(status(&app, req).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_and_login_round_trip() {
    let state = test_state().await;
    let app = routes::app(state);

    let register = Request::builder()
        .method("POST")
        .uri("/v1/auth/register")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "full_name": "Budi Santoso",
                "email": "budi@example.com",
                "password": "password123",
                "role": "STUDENT"
            })
            .to_string(),
        ))
        .unwrap();
    assert_eq!(status(&app, register).await, StatusCode::CREATED);

    let login = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": "budi@example.com", "password": "password123" }).to_string(),
        ))
        .unwrap();
    assert_eq!(status(&app, login).await, StatusCode::OK);

    let bad_login = Request::builder()
        .method("POST")
        .uri("/v1/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": "budi@example.com", "password": "wrong" }).to_string(),
        ))
        .unwrap();
    assert_eq!(status(&app, bad_login).await, StatusCode::UNAUTHORIZED);
}
