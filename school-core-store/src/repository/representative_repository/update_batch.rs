use async_trait::async_trait;
use school_core_db::models::RepresentativeModel;
use school_core_db::repository::update_batch::UpdateBatch;
use std::error::Error;

use super::repo_impl::RepresentativeRepositoryImpl;
use crate::store::StoreError;

impl RepresentativeRepositoryImpl {
    pub(super) async fn update_batch_impl(
        repo: &RepresentativeRepositoryImpl,
        items: Vec<RepresentativeModel>,
    ) -> Result<Vec<RepresentativeModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let tables = tx.as_mut().ok_or(StoreError::TransactionConsumed)?;

        if let Some(unknown) = items
            .iter()
            .find(|item| !tables.representatives.contains_key(&item.id))
        {
            return Err(StoreError::NotFound {
                entity: "Representative",
                id: unknown.id,
            }
            .into());
        }

        for item in &items {
            tables.representatives.insert(item.id, item.clone());
        }
        tracing::debug!(count = items.len(), "representatives updated");
        Ok(items)
    }
}

#[async_trait]
impl UpdateBatch<RepresentativeModel> for RepresentativeRepositoryImpl {
    async fn update_batch(
        &self,
        items: Vec<RepresentativeModel>,
    ) -> Result<Vec<RepresentativeModel>, Box<dyn Error + Send + Sync>> {
        Self::update_batch_impl(self, items).await
    }
}
