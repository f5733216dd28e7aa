// ============================================================================
// Recipe Explorer Library
// ============================================================================

pub mod config;
pub mod core;
pub mod repository;
pub mod session;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use config::AppConfig;
pub use self::core::{Clock, Recipe, RecipeFields, Result, StoreError, SystemClock};
pub use repository::{ListQuery, Page, PageMeta, RecipeRepository};
pub use session::{Session, SessionRegistry, TokenStrategy};
pub use storage::{DocumentStore, InMemoryStore, JsonFileStore, RecoveryMode, StoreDocument};
pub use web::{AppState, build_router};

use std::sync::Arc;
use tracing::info;

/// Wires the store, repository and session registry described by `config`
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn DocumentStore> = if config.in_memory {
        info!("recipe store: in-memory");
        Arc::new(InMemoryStore::new())
    } else {
        let store = JsonFileStore::open(&config.store_path, config.recovery).map_err(|e| {
            anyhow::anyhow!(
                "failed to open recipe store at {}: {}",
                config.store_path.display(),
                e
            )
        })?;
        info!(path = %config.store_path.display(), recovery = ?config.recovery, "recipe store: json file");
        Arc::new(store)
    };

    let recipes = Arc::new(RecipeRepository::new(store));
    let sessions = Arc::new(SessionRegistry::new(config.token_strategy));
    Ok(AppState::new(recipes, sessions))
}
