use async_trait::async_trait;
use school_core_db::models::EnrollmentModel;
use school_core_db::repository::create_batch::CreateBatch;
use std::error::Error;

use super::repo_impl::EnrollmentRepositoryImpl;
use crate::store::StoreError;

impl EnrollmentRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &EnrollmentRepositoryImpl,
        items: Vec<EnrollmentModel>,
    ) -> Result<Vec<EnrollmentModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let tables = tx.as_mut().ok_or(StoreError::TransactionConsumed)?;

        for item in &items {
            if tables.enrollments.contains_key(&item.id) {
                return Err(StoreError::DuplicateId {
                    entity: "Enrollment",
                    id: item.id,
                }
                .into());
            }
            if !tables.students.contains_key(&item.student_id) {
                return Err(StoreError::NotFound {
                    entity: "Student",
                    id: item.student_id,
                }
                .into());
            }
        }

        for item in &items {
            tables.enrollments.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<EnrollmentModel> for EnrollmentRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<EnrollmentModel>,
    ) -> Result<Vec<EnrollmentModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_utils::create_test_enrollment;
    use crate::test_helper::setup_test_context;
    use school_core_db::models::EnrollmentState;
    use school_core_db::repository::CreateBatch;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_batch_requires_existing_student() {
        let ctx = setup_test_context().await;
        let repo = &ctx.repos().enrollment_repository;

        let orphan = create_test_enrollment(Uuid::new_v4(), None, EnrollmentState::Draft);
        let err = repo.create_batch(vec![orphan]).await.unwrap_err();
        assert!(err.to_string().starts_with("Student"));
    }
}
