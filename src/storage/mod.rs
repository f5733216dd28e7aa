pub mod document;
pub mod engine;
pub mod memory;
pub mod persistence;

pub use document::StoreDocument;
pub use engine::DocumentStore;
pub use memory::InMemoryStore;
pub use persistence::{JsonFileStore, RecoveryMode};
