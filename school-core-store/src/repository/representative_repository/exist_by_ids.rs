use async_trait::async_trait;
use school_core_db::repository::exist_by_ids::ExistByIds;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::RepresentativeRepositoryImpl;
use crate::store::StoreError;

impl RepresentativeRepositoryImpl {
    pub(super) async fn exist_by_ids_impl(
        repo: &RepresentativeRepositoryImpl,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        let tx = repo.executor.tx.lock().await;
        let tables = tx.as_ref().ok_or(StoreError::TransactionConsumed)?;
        Ok(ids
            .iter()
            .map(|id| (*id, tables.representatives.contains_key(id)))
            .collect())
    }
}

#[async_trait]
impl ExistByIds for RepresentativeRepositoryImpl {
    async fn exist_by_ids(
        &self,
        ids: &[Uuid],
    ) -> Result<Vec<(Uuid, bool)>, Box<dyn Error + Send + Sync>> {
        Self::exist_by_ids_impl(self, ids).await
    }
}
