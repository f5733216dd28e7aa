use crate::core::Recipe;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// Search and pagination parameters for listing recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Matched against the title and every ingredient
    pub q: Option<String>,
    /// Matched against ingredients only
    pub ingredient: Option<String>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            q: None,
            ingredient: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListQuery {
    pub fn page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = Some(ingredient.into());
        self
    }
}

/// Pagination metadata returned alongside a page of recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: usize,
    pub total_pages: usize,
    pub first_page: usize,
    pub last_page: usize,
    pub page: usize,
    pub previous_page: Option<usize>,
    pub next_page: Option<usize>,
    pub page_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub items: Vec<Recipe>,
    pub meta: PageMeta,
}

/// Filters `recipes` in place, keeping insertion order
///
/// `q` is applied first, then `ingredient`; empty strings do not filter.
pub fn filter_recipes(recipes: &mut Vec<Recipe>, query: &ListQuery) {
    if let Some(q) = non_empty(query.q.as_deref()) {
        let needle = q.to_lowercase();
        recipes.retain(|recipe| recipe.matches_query(&needle));
    }

    if let Some(ingredient) = non_empty(query.ingredient.as_deref()) {
        let needle = ingredient.to_lowercase();
        recipes.retain(|recipe| recipe.has_ingredient(&needle));
    }
}

/// Slices an already-filtered sequence into one page
///
/// `page` is clamped to at least 1 and `page_size` into `1..=MAX_PAGE_SIZE`.
pub fn paginate(recipes: Vec<Recipe>, page: usize, page_size: usize) -> Page {
    let page = page.max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);

    let total = recipes.len();
    let start = (page - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);

    let items = if start >= total {
        Vec::new()
    } else {
        recipes
            .into_iter()
            .skip(start)
            .take(page_size)
            .collect()
    };

    let total_pages = total.div_ceil(page_size);

    Page {
        items,
        meta: PageMeta {
            total,
            total_pages,
            first_page: 1,
            last_page: total_pages.max(1),
            page,
            previous_page: if page > 1 { Some(page - 1) } else { None },
            next_page: if end < total { Some(page + 1) } else { None },
            page_size,
        },
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
