use async_trait::async_trait;
use school_core_db::repository::delete_batch::DeleteBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::RepresentativeRepositoryImpl;
use crate::store::StoreError;

impl RepresentativeRepositoryImpl {
    /// Erase representatives together with every link pointing at them.
    ///
    /// Enrollments that named a deleted representative as responsible lose
    /// that reference.
    pub(super) async fn delete_batch_impl(
        repo: &RepresentativeRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = repo.executor.tx.lock().await;
        let tables = tx.as_mut().ok_or(StoreError::TransactionConsumed)?;

        let mut deleted_count = 0;
        for id in ids {
            let Some(removed) = tables.representatives.remove(id) else {
                continue;
            };
            for student_id in &removed.student_ids {
                if let Some(student) = tables.students.get_mut(student_id) {
                    student.representative_ids.retain(|linked| linked != id);
                }
            }
            for enrollment in tables.enrollments.values_mut() {
                if enrollment.responsible_representative_id == Some(*id) {
                    enrollment.responsible_representative_id = None;
                }
            }
            deleted_count += 1;
        }

        tracing::debug!(deleted_count, "representatives deleted");
        Ok(deleted_count)
    }
}

#[async_trait]
impl DeleteBatch for RepresentativeRepositoryImpl {
    async fn delete_batch(&self, ids: &[Uuid]) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::delete_batch_impl(self, ids).await
    }
}
