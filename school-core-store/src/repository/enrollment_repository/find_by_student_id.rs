use async_trait::async_trait;
use school_core_db::models::EnrollmentModel;
use school_core_db::repository::find_by_student_id::FindByStudentId;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::EnrollmentRepositoryImpl;
use crate::store::StoreError;

impl EnrollmentRepositoryImpl {
    pub(super) async fn find_by_student_id_impl(
        repo: &EnrollmentRepositoryImpl,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentModel>, Box<dyn Error + Send + Sync>> {
        let tx = repo.executor.tx.lock().await;
        let tables = tx.as_ref().ok_or(StoreError::TransactionConsumed)?;
        Ok(tables
            .enrollments
            .values()
            .filter(|enrollment| enrollment.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl FindByStudentId<EnrollmentModel> for EnrollmentRepositoryImpl {
    async fn find_by_student_id(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<EnrollmentModel>, Box<dyn Error + Send + Sync>> {
        Self::find_by_student_id_impl(self, student_id).await
    }
}
