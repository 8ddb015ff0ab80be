use async_trait::async_trait;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// Repository trait for entities owned by a student
#[async_trait]
pub trait FindByStudentId<T: Identifiable>: Send + Sync {
    /// Find every entity referencing `student_id`
    ///
    /// # Returns
    /// * `Ok(Vec<T>)` - Matching entities, empty when the student has none
    /// * `Err` - An error if the unit of work has been consumed
    async fn find_by_student_id(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
