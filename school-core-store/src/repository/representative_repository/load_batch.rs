use async_trait::async_trait;
use school_core_db::models::RepresentativeModel;
use school_core_db::repository::load_batch::LoadBatch;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::RepresentativeRepositoryImpl;
use crate::store::StoreError;

impl RepresentativeRepositoryImpl {
    pub(super) async fn load_batch_impl(
        repo: &RepresentativeRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<Option<RepresentativeModel>>, Box<dyn Error + Send + Sync>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let tx = repo.executor.tx.lock().await;
        let tables = tx.as_ref().ok_or(StoreError::TransactionConsumed)?;
        Ok(ids
            .iter()
            .map(|id| tables.representatives.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl LoadBatch<RepresentativeModel> for RepresentativeRepositoryImpl {
    async fn load_batch(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<Option<RepresentativeModel>>, Box<dyn Error + Send + Sync>> {
        Self::load_batch_impl(self, ids).await
    }
}
