use axum::{Json, extract::State, http::StatusCode};

use crate::{
    core::{Recipe, Result as StoreResult},
    repository::RecipeRepository,
    web::{
        error::{ApiError, ApiResult},
        extract::{ApiJson, ApiPath, ApiQuery},
        models::{ApiResponse, CreateRecipeRequest, ListRecipesParams, RecipeResponse, UpdateRecipeRequest},
        state::AppState,
    },
};

const NOT_FOUND_MESSAGE: &str = "Recipe not found";

/// Runs a repository call on the blocking pool; the store lock and file I/O stay off the reactor
async fn with_repository<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    F: FnOnce(&RecipeRepository) -> StoreResult<T> + Send + 'static,
    T: Send + 'static,
{
    let repository = state.recipes.clone();
    let result = tokio::task::spawn_blocking(move || op(&repository))
        .await
        .map_err(|err| ApiError::internal(format!("repository task failed: {err}")))?;
    Ok(result?)
}

pub async fn list_recipes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListRecipesParams>,
) -> ApiResult<Json<ApiResponse<Vec<Recipe>>>> {
    let query = params.into_query().map_err(ApiError::validation)?;
    let page = with_repository(&state, move |repo| repo.list(&query)).await?;
    Ok(Json(ApiResponse::paged(page.items, page.meta)))
}

pub async fn create_recipe(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateRecipeRequest>,
) -> ApiResult<(StatusCode, Json<RecipeResponse>)> {
    payload.validate().map_err(ApiError::validation)?;

    let recipe = with_repository(&state, move |repo| repo.create(payload.into())).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(recipe))))
}

pub async fn get_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<RecipeResponse>> {
    let recipe = with_repository(&state, move |repo| repo.get(id))
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))?;
    Ok(Json(ApiResponse::ok(recipe)))
}

pub async fn update_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateRecipeRequest>,
) -> ApiResult<Json<RecipeResponse>> {
    payload.validate().map_err(ApiError::validation)?;

    let recipe = with_repository(&state, move |repo| repo.update(id, payload.into()))
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND_MESSAGE))?;
    Ok(Json(ApiResponse::ok(recipe)))
}

pub async fn delete_recipe(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    let deleted = with_repository(&state, move |repo| repo.delete(id)).await?;
    if !deleted {
        return Err(ApiError::not_found(NOT_FOUND_MESSAGE));
    }
    Ok(StatusCode::NO_CONTENT)
}
