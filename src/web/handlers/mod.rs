pub mod auth;
pub mod health;
pub mod recipes;

use super::error::ApiError;

pub async fn fallback() -> ApiError {
    ApiError::not_found("The requested URL was not found on the server.")
}
