use crate::core::{Recipe, Result, StoreError};
use serde::{Deserialize, Serialize};

/// The persisted unit: every recipe plus the auto-increment counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    pub recipes: Vec<Recipe>,
    pub next_id: i64,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            recipes: Vec::new(),
            next_id: 1,
        }
    }
}

impl StoreDocument {
    /// Returns the id the next created recipe receives
    ///
    /// Normally this is `next_id`; a hand-edited file whose counter lags
    /// behind the stored ids is bumped past the largest id instead.
    /// Fails without touching the counter once ids would overflow `i64`.
    pub fn allocate_id(&mut self) -> Result<i64> {
        let exhausted = StoreError::IdsExhausted {
            next_id: self.next_id,
        };
        let max_id = self.recipes.iter().map(|r| r.id).max().unwrap_or(0);
        let Some(floor) = max_id.checked_add(1) else {
            return Err(exhausted);
        };
        let id = self.next_id.max(floor);
        self.next_id = id.checked_add(1).ok_or(exhausted)?;
        Ok(id)
    }

    pub fn find(&self, id: i64) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn find_mut(&mut self, id: i64) -> Option<&mut Recipe> {
        self.recipes.iter_mut().find(|r| r.id == id)
    }

    /// Removes the recipe with `id`, reporting whether anything was removed
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != id);
        self.recipes.len() < before
    }
}
