use crate::core::{Recipe, RecipeFields};
use crate::repository::{DEFAULT_PAGE_SIZE, ListQuery, MAX_PAGE_SIZE, PageMeta};
use serde::{Deserialize, Serialize};

pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 2_000;
pub const INSTRUCTIONS_MAX_CHARS: usize = 10_000;
pub const USERNAME_MAX_CHARS: usize = 100;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListRecipesParams {
    pub q: Option<String>,
    pub ingredient: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListRecipesParams {
    /// Checks the bounds and converts into a repository query
    pub fn into_query(self) -> Result<ListQuery, String> {
        let page = self.page.unwrap_or(1);
        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE as i64);

        if page < 1 {
            return Err("page must be >= 1".to_string());
        }
        if page_size < 1 || page_size > MAX_PAGE_SIZE as i64 {
            return Err(format!("page_size must be between 1 and {}", MAX_PAGE_SIZE));
        }

        Ok(ListQuery {
            q: self.q,
            ingredient: self.ingredient,
            page: usize::try_from(page).unwrap_or(usize::MAX),
            page_size: page_size as usize,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateRecipeRequest {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CreateRecipeRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)?;
        validate_max("description", self.description.as_deref(), DESCRIPTION_MAX_CHARS)?;
        validate_max("instructions", self.instructions.as_deref(), INSTRUCTIONS_MAX_CHARS)?;
        Ok(())
    }
}

impl From<CreateRecipeRequest> for RecipeFields {
    fn from(request: CreateRecipeRequest) -> Self {
        Self {
            title: Some(request.title),
            description: request.description,
            ingredients: Some(request.ingredients),
            instructions: request.instructions,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateRecipeRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateRecipeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(title) = self.title.as_deref() {
            validate_title(title)?;
        }
        validate_max("description", self.description.as_deref(), DESCRIPTION_MAX_CHARS)?;
        validate_max("instructions", self.instructions.as_deref(), INSTRUCTIONS_MAX_CHARS)?;
        Ok(())
    }
}

impl From<UpdateRecipeRequest> for RecipeFields {
    fn from(request: UpdateRecipeRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            ingredients: request.ingredients,
            instructions: request.instructions,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    /// Accepted and ignored
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        let len = self.username.chars().count();
        if len == 0 || len > USERNAME_MAX_CHARS {
            return Err(format!(
                "username must be between 1 and {} characters",
                USERNAME_MAX_CHARS
            ));
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), String> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(format!(
            "title must be between 1 and {} characters",
            TITLE_MAX_CHARS
        ));
    }
    Ok(())
}

fn validate_max(field: &str, value: Option<&str>, max: usize) -> Result<(), String> {
    match value {
        Some(value) if value.chars().count() > max => Err(format!(
            "{} must be at most {} characters",
            field, max
        )),
        _ => Ok(()),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Success envelope: `{"success": true, "data": ..., "meta": ...}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    pub fn paged(data: T, meta: PageMeta) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

pub type RecipeResponse = ApiResponse<Recipe>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub success: bool,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}
