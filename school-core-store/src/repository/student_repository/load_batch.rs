use async_trait::async_trait;
use school_core_db::models::StudentModel;
use school_core_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StudentRepositoryImpl;
use crate::store::StoreError;

impl StudentRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &StudentRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<StudentModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tx = repo.executor.tx.lock().await;
        let tables = tx.as_ref().ok_or(StoreError::TransactionConsumed)?;
        Ok(ids.iter().map(|id| tables.students.get(id).cloned()).collect())
    }
}

#[async_trait]
impl LoadBatch<StudentModel> for StudentRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<StudentModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
