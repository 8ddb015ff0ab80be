use async_trait::async_trait;
use school_core_db::models::RepresentativeModel;
use school_core_db::repository::create_batch::CreateBatch;
use std::collections::HashSet;
use std::error::Error;

use super::repo_impl::RepresentativeRepositoryImpl;
use crate::store::StoreError;

impl RepresentativeRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &RepresentativeRepositoryImpl,
        items: Vec<RepresentativeModel>,
    ) -> Result<Vec<RepresentativeModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let tables = tx.as_mut().ok_or(StoreError::TransactionConsumed)?;

        // Reject the whole batch before inserting anything
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if tables.representatives.contains_key(&item.id) || !seen.insert(item.id) {
                return Err(StoreError::DuplicateId {
                    entity: "Representative",
                    id: item.id,
                }
                .into());
            }
        }

        for item in &items {
            tables.representatives.insert(item.id, item.clone());
        }
        tracing::debug!(count = items.len(), "representatives created");
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<RepresentativeModel> for RepresentativeRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<RepresentativeModel>,
    ) -> Result<Vec<RepresentativeModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
