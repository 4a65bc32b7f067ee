//! Handler tests for the Users domain
//!
//! Drive the users router over the in-memory repository and check status codes,
//! response bodies and the standard error shape.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn app() -> Router {
    handlers::router(UserService::new(InMemoryUserRepository::new()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    (status, json_body(response.into_body()).await)
}

async fn signup(app: &Router, name: &str, email: &str, password: &str) -> String {
    let (status, _) = send(
        app,
        json_request(
            "POST",
            "/",
            json!({"name": name, "email": email, "password": password, "password_confirm": password}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, users) = send(app, empty_request("GET", "/")).await;
    users
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["email"] == email)
        .map(|u| u["id"].as_str().unwrap().to_string())
        .unwrap()
}

#[tokio::test]
async fn test_create_returns_exactly_name_and_email() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/",
            json!({"name": "A", "email": "a@x.com", "password": "p1", "password_confirm": "p1"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"name": "A", "email": "a@x.com"}));
}

#[tokio::test]
async fn test_second_signup_with_same_email_conflicts() {
    let app = app();
    signup(&app, "A", "a@x.com", "p1").await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/",
            json!({"name": "B", "email": "a@x.com", "password": "p2", "password_confirm": "p2"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "EMAIL_ALREADY_TAKEN");
    assert_eq!(body["message"], "This email has already been taken!");
}

#[tokio::test]
async fn test_signup_password_mismatch_is_forbidden() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/",
            json!({"name": "A", "email": "a@x.com", "password": "p1", "password_confirm": "p2"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "INVALID_PASSWORD");
    assert_eq!(body["message"], "Please make sure your password match!");

    let (_, users) = send(&app, empty_request("GET", "/")).await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_signup_invalid_email_fails_validation() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/",
            json!({"name": "A", "email": "nope", "password": "p1", "password_confirm": "p1"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_user_hides_password_hash() {
    let app = app();
    let id = signup(&app, "A", "a@x.com", "p1").await;

    let (status, body) = send(&app, empty_request("GET", &format!("/{}", id))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "A");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_get_unknown_user_is_unprocessable() {
    let app = app();

    for uri in ["/0190a0c4-8b5e-7c1a-9f3e-2d4b6a8c0e12", "/not-a-uuid"] {
        let (status, body) = send(&app, empty_request("GET", uri)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Unknown user");
    }
}

#[tokio::test]
async fn test_update_with_put_and_patch() {
    let app = app();
    let id = signup(&app, "A", "a@x.com", "p1").await;

    for method in ["PUT", "PATCH"] {
        let (status, body) = send(
            &app,
            json_request(method, &format!("/{}", id), json!({"name": method, "email": "a@x.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": id}));
    }

    let (_, body) = send(&app, empty_request("GET", &format!("/{}", id))).await;
    assert_eq!(body["name"], "PATCH");
}

#[tokio::test]
async fn test_update_to_another_users_email_conflicts() {
    let app = app();
    let first = signup(&app, "A", "a@x.com", "p1").await;
    signup(&app, "B", "b@x.com", "p1").await;

    let (status, body) = send(
        &app,
        json_request("PUT", &format!("/{}", first), json!({"name": "A", "email": "b@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "EMAIL_ALREADY_TAKEN");
}

#[tokio::test]
async fn test_update_unknown_user_is_unprocessable() {
    let app = app();

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/0190a0c4-8b5e-7c1a-9f3e-2d4b6a8c0e12",
            json!({"name": "A", "email": "a@x.com"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["message"], "Failed to update user");
}

#[tokio::test]
async fn test_change_password_flow() {
    let app = app();
    let id = signup(&app, "A", "a@x.com", "p1").await;
    let uri = format!("/{}/password", id);

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            json!({"current_password": "wrong", "new_password": "p2", "password_confirm": "p2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Password is incorrect!");

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            json!({"current_password": "p1", "new_password": "p1", "password_confirm": "p1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(
        body["message"],
        "Please make sure your password is different than your old one!"
    );

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &uri,
            json!({"current_password": "p1", "new_password": "p2", "password_confirm": "p2"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id}));
}

#[tokio::test]
async fn test_delete_twice() {
    let app = app();
    let id = signup(&app, "A", "a@x.com", "p1").await;
    let uri = format!("/{}", id);

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": id}));

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "UNPROCESSABLE_ENTITY");
    assert_eq!(body["message"], "Failed to delete user");
}

#[tokio::test]
async fn test_body_validation_runs_before_email_check() {
    let app = app();
    signup(&app, "A", "a@x.com", "p1").await;

    // Taken address, but the name rule fails first
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/",
            json!({"name": "", "email": "a@x.com", "password": "p1", "password_confirm": "p1"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
}
