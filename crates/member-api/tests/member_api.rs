//! HTTP tests for the member routes, backed by the in-memory store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use member_api::{build_router, AppState};
use member_infrastructure::InMemoryMemberStore;
use member_shared::config::AppConfig;

fn test_app() -> Router {
    let config: AppConfig = AppConfig::defaults("test")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    let state = AppState::new(Arc::new(InMemoryMemberStore::new()), config).unwrap();
    build_router(state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `NAME=token` pair from the login response's Set-Cookie header.
fn cookie_pair(response: &Response<Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login sets a cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn register(app: &Router, email: &str, password: &str, name: &str) -> StatusCode {
    send(
        app,
        Method::POST,
        "/member/save",
        None,
        Some(json!({ "email": email, "password": password, "name": name })),
    )
    .await
    .status()
}

async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    send(
        app,
        Method::POST,
        "/member/login",
        None,
        Some(json!({ "email": email, "password": password })),
    )
    .await
}

async fn logged_in(app: &Router, email: &str, password: &str, name: &str) -> String {
    assert_eq!(register(app, email, password, name).await, StatusCode::CREATED);
    let response = login(app, email, password).await;
    assert_eq!(response.status(), StatusCode::OK);
    cookie_pair(&response)
}

#[tokio::test]
async fn index_and_health_are_public() {
    let app = test_app();

    let index = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(index.status(), StatusCode::OK);
    assert_eq!(body_json(index).await["data"]["service"], "member-server");

    let health = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(health.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = test_app();

    assert_eq!(register(&app, "a@x.com", "p1", "Ann").await, StatusCode::CREATED);

    let response = send(
        &app,
        Method::POST,
        "/member/save",
        None,
        Some(json!({ "email": "a@x.com", "password": "p2" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "DUPLICATE_EMAIL");
}

#[tokio::test]
async fn login_returns_member_without_password() {
    let app = test_app();
    register(&app, "a@x.com", "p1", "Ann").await;

    let response = login(&app, "a@x.com", "p1").await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = cookie_pair(&response);
    assert!(cookie.starts_with("MEMBER_SESSION="));
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "Ann");
    assert_eq!(body["data"]["email"], "a@x.com");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn index_reports_configured_name() {
    let config: AppConfig = AppConfig::defaults("test")
        .unwrap()
        .set_override("app.name", "club-directory")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    let state = AppState::new(Arc::new(InMemoryMemberStore::new()), config).unwrap();
    let app = build_router(state);

    let index = send(&app, Method::GET, "/", None, None).await;

    assert_eq!(body_json(index).await["data"]["service"], "club-directory");
}

#[tokio::test]
async fn relogin_replaces_previous_session() {
    let app = test_app();
    let old_cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;

    let response = send(
        &app,
        Method::POST,
        "/member/login",
        Some(&old_cookie),
        Some(json!({ "email": "a@x.com", "password": "p1" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let new_cookie = cookie_pair(&response);
    assert_ne!(new_cookie, old_cookie);

    let stale = send(&app, Method::GET, "/member/", Some(&old_cookie), None).await;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);
    let fresh = send(&app, Method::GET, "/member/", Some(&new_cookie), None).await;
    assert_eq!(fresh.status(), StatusCode::OK);
}

#[tokio::test]
async fn failed_relogin_keeps_current_session() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;

    let response = send(
        &app,
        Method::POST,
        "/member/login",
        Some(&cookie),
        Some(json!({ "email": "a@x.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let still = send(&app, Method::GET, "/member/", Some(&cookie), None).await;
    assert_eq!(still.status(), StatusCode::OK);
}

#[tokio::test]
async fn failed_logins_are_uniform() {
    let app = test_app();
    register(&app, "a@x.com", "p1", "Ann").await;

    let wrong_password = login(&app, "a@x.com", "wrong").await;
    let unknown_email = login(&app, "ghost@x.com", "p1").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_email).await;
    assert_eq!(a["error"], b["error"]);
}

#[tokio::test]
async fn member_routes_require_session() {
    let app = test_app();

    for uri in ["/member/", "/member/1", "/member/update", "/member/delete/1"] {
        let response = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let bogus = send(&app, Method::GET, "/member/", Some("MEMBER_SESSION=bogus"), None).await;
    assert_eq!(bogus.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_and_detail() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;
    register(&app, "b@x.com", "p2", "Bob").await;

    let list = send(&app, Method::GET, "/member/", Some(&cookie), None).await;
    assert_eq!(list.status(), StatusCode::OK);
    let members = body_json(list).await["data"].as_array().unwrap().clone();
    assert_eq!(members.len(), 2);

    let detail = send(&app, Method::GET, "/member/2", Some(&cookie), None).await;
    assert_eq!(detail.status(), StatusCode::OK);
    assert_eq!(body_json(detail).await["data"]["email"], "b@x.com");

    let missing = send(&app, Method::GET, "/member/99", Some(&cookie), None).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_form_resolves_session_member() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;

    let response = send(&app, Method::GET, "/member/update", Some(&cookie), None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["email"], "a@x.com");
}

#[tokio::test]
async fn update_redirects_to_detail_and_keeps_session() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;

    let response = send(
        &app,
        Method::POST,
        "/member/update",
        Some(&cookie),
        Some(json!({ "id": 1, "email": "ann@new.com", "password": "p1", "name": "Anna" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/member/1");

    let form = send(&app, Method::GET, "/member/update", Some(&cookie), None).await;
    assert_eq!(form.status(), StatusCode::OK);
    let body = body_json(form).await;
    assert_eq!(body["data"]["email"], "ann@new.com");
    assert_eq!(body["data"]["name"], "Anna");
}

#[tokio::test]
async fn update_to_taken_email_is_conflict() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;
    register(&app, "b@x.com", "p2", "Bob").await;

    let response = send(
        &app,
        Method::POST,
        "/member/update",
        Some(&cookie),
        Some(json!({ "id": 1, "email": "b@x.com", "password": "p1" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn delete_redirects_to_list() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;
    register(&app, "b@x.com", "p2", "Bob").await;

    let response = send(&app, Method::GET, "/member/delete/2", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/member/");

    let gone = send(&app, Method::GET, "/member/2", Some(&cookie), None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let again = send(&app, Method::GET, "/member/delete/2", Some(&cookie), None).await;
    assert_eq!(again.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn logout_invalidates_session() {
    let app = test_app();
    let cookie = logged_in(&app, "a@x.com", "p1", "Ann").await;

    let response = send(&app, Method::POST, "/member/logout", Some(&cookie), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let after = send(&app, Method::GET, "/member/", Some(&cookie), None).await;
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_is_ok() {
    let app = test_app();

    let response = send(&app, Method::GET, "/member/logout", None, None).await;

    assert_eq!(response.status(), StatusCode::OK);
}
