use super::document::StoreDocument;
use super::engine::DocumentStore;
use crate::core::Result;
use std::sync::Mutex;

/// Non-durable store; the document lives only as long as the process
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Mutex<StoreDocument>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }
}

impl DocumentStore for InMemoryStore {
    fn read(&self) -> Result<StoreDocument> {
        Ok(self.document.lock()?.clone())
    }

    fn write(&self, document: &StoreDocument) -> Result<()> {
        *self.document.lock()? = document.clone();
        Ok(())
    }
}
