use std::sync::Arc;

use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use recipe_explorer::{
    AppState, InMemoryStore, JsonFileStore, RecipeRepository, RecoveryMode, SessionRegistry,
    StoreDocument, TokenStrategy, build_router,
};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> axum::Router {
    let recipes = Arc::new(RecipeRepository::new(Arc::new(InMemoryStore::new())));
    let sessions = Arc::new(SessionRegistry::new(TokenStrategy::Random));
    build_router(AppState::new(recipes, sessions))
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("response body should be readable")
        .to_bytes();

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

async fn send_json(
    app: &axum::Router,
    method: Method,
    uri: &str,
    payload: Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");
    send(app, request).await
}

async fn send_empty(app: &axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

async fn send_with_token(
    app: &axum::Router,
    method: Method,
    uri: &str,
    authorization: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

async fn create(app: &axum::Router, title: &str, ingredients: &[&str]) -> Value {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/recipes",
        json!({ "title": title, "ingredients": ingredients }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"].clone()
}

#[tokio::test]
async fn root_and_health() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Recipe Explorer Backend" }));

    let (status, body) = send_empty(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_and_get_recipe() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/recipes",
        json!({
            "title": "Tomato Soup",
            "ingredients": ["tomato", "basil"],
            "tags": ["soup"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["description"], "");
    assert_eq!(body["data"]["instructions"], "");
    assert!(body.get("meta").is_none());

    let (status, fetched) = send_empty(&app, Method::GET, "/recipes/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], body["data"]);
}

#[tokio::test]
async fn list_supports_search_and_pagination() {
    let app = app();
    create(&app, "Tomato Soup", &["tomato", "basil"]).await;
    create(&app, "Carbonara", &["pasta", "egg"]).await;
    create(&app, "Bruschetta", &["bread", "Tomato"]).await;

    let (status, page) = send_empty(&app, Method::GET, "/recipes?q=TOMATO&page_size=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["success"], true);
    assert_eq!(page["data"].as_array().expect("data should be array").len(), 1);
    assert_eq!(page["data"][0]["title"], "Tomato Soup");
    assert_eq!(
        page["meta"],
        json!({
            "total": 2,
            "total_pages": 2,
            "first_page": 1,
            "last_page": 2,
            "page": 1,
            "previous_page": null,
            "next_page": 2,
            "page_size": 1
        })
    );

    let (_, page) = send_empty(&app, Method::GET, "/recipes?q=tomato&ingredient=basil").await;
    assert_eq!(page["meta"]["total"], 1);

    let (_, page) = send_empty(&app, Method::GET, "/recipes/?ingredient=pasta").await;
    assert_eq!(page["data"][0]["title"], "Carbonara");
}

#[tokio::test]
async fn list_rejects_bad_paging() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/recipes?page=0").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 422);
    assert_eq!(body["error"]["message"], "page must be >= 1");

    let (status, _) = send_empty(&app, Method::GET, "/recipes?page_size=101").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send_empty(&app, Method::GET, "/recipes?page=abc").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn update_merges_fields() {
    let app = app();
    let created = create(&app, "Pancakes", &["flour", "milk"]).await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/recipes/1",
        json!({ "title": "Fluffy Pancakes", "tags": ["breakfast"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Fluffy Pancakes");
    assert_eq!(body["data"]["ingredients"], json!(["flour", "milk"]));
    assert_eq!(body["data"]["tags"], json!(["breakfast"]));
    assert_eq!(body["data"]["created_at"], created["created_at"]);
}

#[tokio::test]
async fn update_validates_and_rejects_immutable_fields() {
    let app = app();
    create(&app, "Pancakes", &[]).await;

    let (status, body) = send_json(&app, Method::PUT, "/recipes/1", json!({ "title": "" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["status"], "Unprocessable Entity");

    let (status, _) = send_json(&app, Method::PUT, "/recipes/1", json!({ "id": 99 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) =
        send_json(&app, Method::PUT, "/recipes/42", json!({ "title": "Ghost" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Recipe not found");
}

#[tokio::test]
async fn create_validates_payload() {
    let app = app();

    let (status, _) = send_json(&app, Method::POST, "/recipes", json!({ "title": "Toast" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/recipes",
        json!({ "title": "x".repeat(201), "ingredients": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["message"], "title must be between 1 and 200 characters");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/recipes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ broken"))
        .expect("request should build");
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_then_delete_again() {
    let app = app();
    create(&app, "Pie", &["apple"]).await;

    let (status, body) = send_empty(&app, Method::DELETE, "/recipes/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send_empty(&app, Method::DELETE, "/recipes/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_empty(&app, Method::GET, "/recipes/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_route_uses_error_envelope() {
    let app = app();
    let (status, body) = send_empty(&app, Method::GET, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 404);
}

#[tokio::test]
async fn login_me_logout_flow() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/auth/login",
        json!({ "username": "alice", "password": "anything" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"], json!({ "id": "alice", "name": "alice" }));
    let token = body["token"].as_str().expect("token should be a string").to_string();
    let bearer = format!("Bearer {token}");

    let (status, body) = send_with_token(&app, Method::GET, "/auth/me", &bearer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], "alice");

    let (status, body) = send_with_token(&app, Method::POST, "/auth/logout", &bearer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let (status, body) = send_with_token(&app, Method::GET, "/auth/me", &bearer).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "Unauthorized");

    // logging out an unknown token is still a success
    let (status, _) = send_with_token(&app, Method::POST, "/auth/logout", &bearer).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn auth_requires_token() {
    let app = app();

    let (status, body) = send_empty(&app, Method::POST, "/auth/logout").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Missing Authorization Bearer token");

    let (status, _) = send_empty(&app, Method::GET, "/auth/me").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/auth/login",
        json!({ "username": "", "password": "x" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn json_file_backend_survives_new_router() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("data/recipes.json");

    let build = || {
        let store = Arc::new(JsonFileStore::open(&path, RecoveryMode::Reset).unwrap());
        let recipes = Arc::new(RecipeRepository::new(store));
        build_router(AppState::new(recipes, Arc::new(SessionRegistry::default())))
    };

    let first = build();
    create(&first, "Persisted", &["salt"]).await;

    let second = build();
    let (status, body) = send_empty(&second, Method::GET, "/recipes/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Persisted");
}

#[tokio::test]
async fn trailing_slashes_are_tolerated() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/health/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/auth/login/",
        json!({ "username": "bob", "password": "pw" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let bearer = format!("Bearer {}", body["token"].as_str().expect("token should be a string"));

    let (status, body) = send_with_token(&app, Method::GET, "/auth/me/", &bearer).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["name"], "bob");

    let (status, _) = send_with_token(&app, Method::POST, "/auth/logout/", &bearer).await;
    assert_eq!(status, StatusCode::OK);

    create(&app, "Slashed", &[]).await;
    let (status, body) = send_empty(&app, Method::GET, "/recipes/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Slashed");
}

#[tokio::test]
async fn exhausted_ids_report_server_error_and_keep_serving() {
    let store = InMemoryStore::with_document(StoreDocument {
        recipes: Vec::new(),
        next_id: i64::MAX,
    });
    let recipes = Arc::new(RecipeRepository::new(Arc::new(store)));
    let app = build_router(AppState::new(recipes, Arc::new(SessionRegistry::default())));

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/recipes",
        json!({ "title": "Overflow", "ingredients": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "internal server error");

    let (status, body) = send_empty(&app, Method::GET, "/recipes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 0);
}
