use async_trait::async_trait;
use school_core_db::models::StudentModel;
use school_core_db::repository::create_batch::CreateBatch;
use std::collections::HashSet;
use std::error::Error;

use super::repo_impl::StudentRepositoryImpl;
use crate::store::StoreError;

impl StudentRepositoryImpl {
    pub(super) async fn create_batch_impl(
        repo: &StudentRepositoryImpl,
        items: Vec<StudentModel>,
    ) -> Result<Vec<StudentModel>, Box<dyn Error + Send + Sync>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = repo.executor.tx.lock().await;
        let tables = tx.as_mut().ok_or(StoreError::TransactionConsumed)?;

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if tables.students.contains_key(&item.id) || !seen.insert(item.id) {
                return Err(StoreError::DuplicateId {
                    entity: "Student",
                    id: item.id,
                }
                .into());
            }
        }

        for item in &items {
            tables.students.insert(item.id, item.clone());
        }
        Ok(items)
    }
}

#[async_trait]
impl CreateBatch<StudentModel> for StudentRepositoryImpl {
    async fn create_batch(
        &self,
        items: Vec<StudentModel>,
    ) -> Result<Vec<StudentModel>, Box<dyn Error + Send + Sync>> {
        Self::create_batch_impl(self, items).await
    }
}
