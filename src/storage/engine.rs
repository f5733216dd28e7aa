use super::document::StoreDocument;
use crate::core::Result;

/// Storage backend trait - anything that can hand out and replace the whole document
///
/// Implementations must make `write` all-or-nothing: a reader sees either the
/// previous document or the new one, never a mix.
pub trait DocumentStore: Send + Sync {
    /// Load the current document
    fn read(&self) -> Result<StoreDocument>;

    /// Replace the stored document wholesale
    fn write(&self, document: &StoreDocument) -> Result<()>;
}
