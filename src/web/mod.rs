//! HTTP surface of the recipe service
//!
//! Validates and parses requests, calls into the repository and session
//! registry, and wraps every answer in the `{"success": ...}` envelope.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    Router,
    http::Method,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use handlers::{auth, health, recipes};

pub fn build_router(state: AppState) -> Router {
    let collection = get(recipes::list_recipes).post(recipes::create_recipe);
    let item = get(recipes::get_recipe)
        .put(recipes::update_recipe)
        .delete(recipes::delete_recipe);

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::healthcheck))
        .route("/health/", get(health::healthcheck))
        .route("/recipes", collection.clone())
        .route("/recipes/", collection)
        .route("/recipes/:id", item.clone())
        .route("/recipes/:id/", item)
        .route("/auth/login", post(auth::login))
        .route("/auth/login/", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/logout/", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/auth/me/", get(auth::me))
        .fallback(handlers::fallback)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
