use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header::AUTHORIZATION},
};
use tracing::info;

use crate::web::{
    error::{ApiError, ApiResult},
    extract::ApiJson,
    models::{LoginRequest, LoginResponse, MeResponse, SuccessResponse, UserInfo},
    state::AppState,
};

/// Issues a session token for any username; the password is not checked
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    payload.validate().map_err(ApiError::validation)?;

    let username = payload.username;
    let token = state.sessions.create(&username, &username)?;
    info!(user = %username, "session created");

    Ok(Json(LoginResponse {
        success: true,
        token,
        user: UserInfo {
            id: username.clone(),
            name: username,
        },
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<SuccessResponse>> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::bad_request("Missing Authorization Bearer token"))?;
    state.sessions.delete(token)?;
    Ok(Json(SuccessResponse { success: true }))
}

pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<Json<MeResponse>> {
    let token = bearer_token(&headers).ok_or_else(ApiError::unauthorized)?;
    let session = state
        .sessions
        .get(token)?
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(MeResponse {
        success: true,
        user: UserInfo {
            id: session.user_id,
            name: session.name,
        },
    }))
}

/// Token from `Authorization: Bearer <token>`; a bare value is accepted as the token itself
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = match raw.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => rest.trim(),
        _ => raw,
    };
    if token.is_empty() { None } else { Some(token) }
}
