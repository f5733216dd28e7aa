use serde::{Deserialize, Serialize};

/// A stored recipe
///
/// Optional fields fall back to empty values when a stored record omits them,
/// so hand-edited store files still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Recipe {
    /// Builds a new recipe from caller-supplied fields, defaulting whatever is missing
    pub fn from_fields(id: i64, fields: RecipeFields, now: i64) -> Self {
        Self {
            id,
            title: fields.title.unwrap_or_default(),
            description: fields.description.unwrap_or_default(),
            ingredients: fields.ingredients.unwrap_or_default(),
            instructions: fields.instructions.unwrap_or_default(),
            tags: fields.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the supplied mutable fields and restamps `updated_at`
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&mut self, fields: RecipeFields, now: i64) {
        if let Some(title) = fields.title {
            self.title = title;
        }
        if let Some(description) = fields.description {
            self.description = description;
        }
        if let Some(ingredients) = fields.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(instructions) = fields.instructions {
            self.instructions = instructions;
        }
        if let Some(tags) = fields.tags {
            self.tags = tags;
        }
        self.updated_at = now;
    }

    /// Case-insensitive substring match against the title or any ingredient
    pub fn matches_query(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower) || self.has_ingredient(needle_lower)
    }

    /// Case-insensitive substring match against any ingredient
    pub fn has_ingredient(&self, needle_lower: &str) -> bool {
        self.ingredients
            .iter()
            .any(|ingredient| ingredient.to_lowercase().contains(needle_lower))
    }
}

/// Partial recipe used by create and update
///
/// Only the mutable fields exist here; `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl RecipeFields {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = Some(ingredients.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.tags.is_none()
    }
}
