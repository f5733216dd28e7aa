use axum::Json;
use serde_json::{Value, json};

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Recipe Explorer Backend" }))
}

pub async fn healthcheck() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
