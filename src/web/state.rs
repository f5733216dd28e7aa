use std::sync::Arc;

use crate::repository::RecipeRepository;
use crate::session::SessionRegistry;

#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<RecipeRepository>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(recipes: Arc<RecipeRepository>, sessions: Arc<SessionRegistry>) -> Self {
        Self { recipes, sessions }
    }
}
