use async_trait::async_trait;
use uuid::Uuid;

/// Generic repository trait for deleting multiple entities in a batch
///
/// Unknown ids are skipped. Returns the number of items actually deleted.
#[async_trait]
pub trait DeleteBatch: Send + Sync {
    /// Delete multiple items by their IDs
    ///
    /// # Arguments
    /// * `ids` - A slice of UUIDs of the entities to delete
    ///
    /// # Returns
    /// * `Ok(usize)` - The number of items successfully deleted
    /// * `Err` - An error if the unit of work has been consumed
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
