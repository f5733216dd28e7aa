//! Recipe-level queries and mutations over a [`DocumentStore`]
//!
//! Every operation takes the store lock for its entire read-(modify-write)
//! cycle. Reads take the same exclusive lock as writes, so concurrent creates
//! can never hand out the same id or drop each other's changes.

pub mod query;

pub use query::{DEFAULT_PAGE_SIZE, ListQuery, MAX_PAGE_SIZE, Page, PageMeta};

use crate::core::{Clock, Recipe, RecipeFields, Result, SystemClock};
use crate::storage::DocumentStore;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

pub struct RecipeRepository {
    store: Arc<dyn DocumentStore>,
    lock: Mutex<()>,
    clock: Arc<dyn Clock>,
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
            clock,
        }
    }

    /// The lock guards no data, so a panic in another holder leaves nothing to repair
    fn exclusive(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Filtered, paginated listing in insertion order
    pub fn list(&self, query: &ListQuery) -> Result<Page> {
        let _guard = self.exclusive();
        let mut recipes = self.store.read()?.recipes;
        query::filter_recipes(&mut recipes, query);
        Ok(query::paginate(recipes, query.page, query.page_size))
    }

    pub fn get(&self, id: i64) -> Result<Option<Recipe>> {
        let _guard = self.exclusive();
        Ok(self.store.read()?.find(id).cloned())
    }

    pub fn create(&self, fields: RecipeFields) -> Result<Recipe> {
        let _guard = self.exclusive();
        let mut document = self.store.read()?;

        let id = document.allocate_id()?;
        let recipe = Recipe::from_fields(id, fields, self.clock.now());
        document.recipes.push(recipe.clone());
        self.store.write(&document)?;

        debug!(recipe_id = id, "recipe created");
        Ok(recipe)
    }

    /// Returns `None` when no recipe has `id`; nothing is written in that case
    pub fn update(&self, id: i64, fields: RecipeFields) -> Result<Option<Recipe>> {
        let _guard = self.exclusive();
        let mut document = self.store.read()?;

        let now = self.clock.now();
        let Some(recipe) = document.find_mut(id) else {
            return Ok(None);
        };
        recipe.apply(fields, now);
        let updated = recipe.clone();
        self.store.write(&document)?;

        debug!(recipe_id = id, "recipe updated");
        Ok(Some(updated))
    }

    /// Returns whether a recipe was removed; the store is only rewritten if so
    pub fn delete(&self, id: i64) -> Result<bool> {
        let _guard = self.exclusive();
        let mut document = self.store.read()?;

        if !document.remove(id) {
            return Ok(false);
        }
        self.store.write(&document)?;

        debug!(recipe_id = id, "recipe deleted");
        Ok(true)
    }
}
