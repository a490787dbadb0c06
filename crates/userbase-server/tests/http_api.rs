//! Drives the full router in-process, once per backend that needs no disk.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;
use userbase_adapters::{BackendConfig, connect};
use userbase_core::application::UserService;
use userbase_server::http::{AppState, router};

async fn app(config: BackendConfig) -> Router {
    let repository = connect(&config).await.unwrap();
    router(AppState::new(UserService::new(repository)))
}

async fn apps() -> Vec<Router> {
    vec![
        app(BackendConfig::Memory).await,
        app(BackendConfig::Sqlite {
            url: "sqlite::memory:".into(),
        })
        .await,
    ]
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
    };
    (status, value)
}

#[tokio::test]
async fn health_is_ok() {
    let app = app(BackendConfig::Memory).await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".into()));
}

#[tokio::test]
async fn list_starts_empty() {
    for app in apps().await {
        let (status, body) = send(&app, "GET", "/users", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn unknown_id_is_404() {
    for app in apps().await {
        let (status, body) = send(&app, "GET", "/users/nobody", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn malformed_id_is_404() {
    let app = app(BackendConfig::Memory).await;
    let (status, _) = send(&app, "GET", "/users/not%20valid", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_utf8_id_is_404() {
    let app = app(BackendConfig::Memory).await;

    for (method, body) in [
        ("GET", None),
        ("PUT", Some(r#"{"name":"Boo"}"#)),
        ("DELETE", None),
    ] {
        let (status, body) = send(&app, method, "/users/%FF", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
        assert_eq!(body["error"], "not_found", "{method}");
        assert!(body["message"].is_string(), "{method}");
    }
}

#[tokio::test]
async fn create_returns_201_with_location() {
    for app in apps().await {
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"id":"ada","name":"Ada Lovelace","email":"ada@example.com"}"#,
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/users/ada");

        let (status, body) = send(&app, "GET", "/users/ada", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": "ada", "name": "Ada Lovelace", "email": "ada@example.com"})
        );
    }
}

#[tokio::test]
async fn create_without_id_assigns_one() {
    for app in apps().await {
        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(r#"{"name":"Grace","email":"grace@example.com"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let id = body["id"].as_str().unwrap().to_owned();
        assert!(!id.is_empty());

        let (status, fetched) = send(&app, "GET", &format!("/users/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, body);
    }
}

#[tokio::test]
async fn list_returns_users_ordered_by_id() {
    for app in apps().await {
        for id in ["carol", "alice", "bob"] {
            let payload = format!(r#"{{"id":"{id}","name":"{id}","email":"{id}@example.com"}}"#);
            let (status, _) = send(&app, "POST", "/users", Some(&payload)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (_, body) = send(&app, "GET", "/users", None).await;
        let ids: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["id"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(ids, ["alice", "bob", "carol"]);
    }
}

#[tokio::test]
async fn duplicate_id_is_409() {
    for app in apps().await {
        let payload = r#"{"id":"dup","name":"One","email":"one@example.com"}"#;
        let (first, _) = send(&app, "POST", "/users", Some(payload)).await;
        let (second, body) = send(&app, "POST", "/users", Some(payload)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }
}

#[tokio::test]
async fn invalid_email_is_400() {
    for app in apps().await {
        let (status, body) = send(
            &app,
            "POST",
            "/users",
            Some(r#"{"name":"Bad","email":"not-an-email"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation");

        let (_, list) = send(&app, "GET", "/users", None).await;
        assert_eq!(list, json!([]));
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app(BackendConfig::Memory).await;
    let (status, body) = send(&app, "POST", "/users", Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation");

    let (status, _) = send(&app, "POST", "/users", Some(r#"{"name":"NoEmail"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_merges_fields() {
    for app in apps().await {
        send(
            &app,
            "POST",
            "/users",
            Some(r#"{"id":"ada","name":"Ada","email":"ada@example.com"}"#),
        )
        .await;

        let (status, body) = send(&app, "PUT", "/users/ada", Some(r#"{"name":"Countess"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"id": "ada", "name": "Countess", "email": "ada@example.com"})
        );

        let (_, fetched) = send(&app, "GET", "/users/ada", None).await;
        assert_eq!(fetched, body);
    }
}

#[tokio::test]
async fn update_with_invalid_field_is_400() {
    let app = app(BackendConfig::Memory).await;
    send(
        &app,
        "POST",
        "/users",
        Some(r#"{"id":"ada","name":"Ada","email":"ada@example.com"}"#),
    )
    .await;

    let (status, _) = send(&app, "PUT", "/users/ada", Some(r#"{"name":"   "}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_and_delete_of_missing_user_are_404() {
    for app in apps().await {
        let (put, _) = send(&app, "PUT", "/users/ghost", Some(r#"{"name":"Boo"}"#)).await;
        let (delete, body) = send(&app, "DELETE", "/users/ghost", None).await;

        assert_eq!(put, StatusCode::NOT_FOUND);
        assert_eq!(delete, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }
}

#[tokio::test]
async fn delete_removes_user() {
    for app in apps().await {
        send(
            &app,
            "POST",
            "/users",
            Some(r#"{"id":"ada","name":"Ada","email":"ada@example.com"}"#),
        )
        .await;

        let (status, body) = send(&app, "DELETE", "/users/ada", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (status, _) = send(&app, "GET", "/users/ada", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
