//! Handler tests for the Users domain
//!
//! These exercise only the users router (mounted at `/`), covering request
//! decoding, status codes and JSON bodies against the in-memory repository.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> (Router, UserService<InMemoryUserRepository>) {
    let service = UserService::new(InMemoryUserRepository::new());
    (handlers::router(service.clone()), service)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_users_empty() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body, json!({ "users": [], "count": 0 }));
}

#[tokio::test]
async fn test_create_user_returns_201() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "username": "testuser", "email": "test@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["user_id"], 1);
    assert_eq!(body["username"], "testuser");
    assert_eq!(body["email"], "test@example.com");
    assert!(body["created_at"].is_string());
}

#[tokio::test]
async fn test_create_user_missing_field_returns_400() {
    let (app, service) = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({ "username": "test" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "username and email fields are required");
    assert_eq!(service.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_user_invalid_email_returns_400() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "username": "testuser", "email": "invalid-email" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "invalid email address");
}

#[tokio::test]
async fn test_create_user_duplicate_email_returns_400() {
    let (app, service) = app();
    service
        .create_user(CreateUser::new("first", "dup@example.com"))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "username": "second", "email": "dup@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("already exists"));
    assert_eq!(service.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_user_without_body_returns_400() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("POST", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON body is required");
}

#[tokio::test]
async fn test_create_user_with_wrong_field_types_returns_400() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "username": 123, "email": "test@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_get_user_returns_200() {
    let (app, service) = app();
    let created = service
        .create_user(CreateUser::new("testuser", "test@example.com"))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", created.id())))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body, serde_json::to_value(&created).unwrap());
}

#[tokio::test]
async fn test_get_user_returns_404_for_missing() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/999")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_get_user_with_non_numeric_id_returns_404() {
    let (app, _) = app();

    let response = app.oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_returns_200() {
    let (app, service) = app();
    let created = service
        .create_user(CreateUser::new("oldname", "old@example.com"))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", created.id()),
            json!({ "username": "newname", "email": "new@example.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["username"], "newname");
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(
        body["created_at"],
        serde_json::to_value(created.created_at()).unwrap()
    );
}

#[tokio::test]
async fn test_update_user_returns_404_for_missing() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("PUT", "/999", json!({ "username": "newname" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_with_empty_object_returns_400() {
    let (app, service) = app();
    service
        .create_user(CreateUser::new("testuser", "test@example.com"))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request("PUT", "/1", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON body is required");
}

#[tokio::test]
async fn test_update_user_without_known_fields_returns_unchanged() {
    let (app, service) = app();
    let created = service
        .create_user(CreateUser::new("testuser", "test@example.com"))
        .await
        .unwrap();
    let expected = serde_json::to_value(&created).unwrap();

    for body in [json!({ "foo": "bar" }), json!({ "username": null })] {
        let response = app
            .clone()
            .oneshot(json_request("PUT", "/1", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response.into_body()).await, expected);
    }
}

#[tokio::test]
async fn test_update_missing_user_without_known_fields_returns_404() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("PUT", "/999", json!({ "foo": "bar" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_update_user_with_empty_strings_keeps_current_values() {
    let (app, service) = app();
    service
        .create_user(CreateUser::new("testuser", "test@example.com"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request("PUT", "/1", json!({ "username": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["username"], "testuser");

    let response = app
        .oneshot(json_request(
            "PUT",
            "/1",
            json!({ "username": "renamed", "email": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["username"], "renamed");
    assert_eq!(body["email"], "test@example.com");
}

#[tokio::test]
async fn test_create_user_with_empty_object_returns_400() {
    let (app, _) = app();

    let response = app
        .oneshot(json_request("POST", "/", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "JSON body is required");
}

#[tokio::test]
async fn test_update_user_duplicate_email_keeps_original() {
    let (app, service) = app();
    service
        .create_user(CreateUser::new("user1", "user1@example.com"))
        .await
        .unwrap();
    let second = service
        .create_user(CreateUser::new("user2", "user2@example.com"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", second.id()),
            json!({ "email": "user1@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(empty_request("GET", &format!("/{}", second.id())))
        .await
        .unwrap();
    let body = json_body(response.into_body()).await;
    assert_eq!(body["email"], "user2@example.com");
}

#[tokio::test]
async fn test_delete_user_then_get_returns_404() {
    let (app, service) = app();
    let created = service
        .create_user(CreateUser::new("testuser", "test@example.com"))
        .await
        .unwrap();
    let uri = format!("/{}", created.id());

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["message"], "User deleted");

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_user_returns_404() {
    let (app, _) = app();

    let response = app
        .oneshot(empty_request("DELETE", "/999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_users_returns_all() {
    let (app, service) = app();
    for (username, email) in [("user1", "a@example.com"), ("user2", "b@example.com")] {
        service
            .create_user(CreateUser::new(username, email))
            .await
            .unwrap();
    }

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["users"].as_array().unwrap().len(), 2);
    assert_eq!(body["users"][0]["user_id"], 1);
}
