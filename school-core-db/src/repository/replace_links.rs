use async_trait::async_trait;
use uuid::Uuid;

/// Repository trait for replacing a student's representative link set
///
/// Both sides of the many-to-many relation are maintained: the student's
/// `representative_ids` become exactly `representative_ids` (duplicates
/// dropped, order kept) and every affected representative's `student_ids`
/// gains or loses the student accordingly.
#[async_trait]
pub trait ReplaceLinks: Send + Sync {
    /// # Returns
    /// * `Ok(usize)` - The number of links removed
    /// * `Err` - Unknown student or representative, or a consumed unit of work
    async fn replace_links(
        &self,
        student_id: Uuid,
        representative_ids: &[Uuid],
    ) -> Result<usize, Box<dyn std::error::Error + Send + Sync>>;
}
