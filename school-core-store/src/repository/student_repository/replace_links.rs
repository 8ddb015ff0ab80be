use async_trait::async_trait;
use school_core_db::repository::replace_links::ReplaceLinks;
use std::error::Error;
use uuid::Uuid;

use super::repo_impl::StudentRepositoryImpl;
use crate::store::StoreError;

impl StudentRepositoryImpl {
    pub(super) async fn replace_links_impl(
        repo: &StudentRepositoryImpl,
        student_id: Uuid,
        representative_ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let mut tx = repo.executor.tx.lock().await;
        let tables = tx.as_mut().ok_or(StoreError::TransactionConsumed)?;

        if !tables.students.contains_key(&student_id) {
            return Err(StoreError::NotFound {
                entity: "Student",
                id: student_id,
            }
            .into());
        }
        if let Some(unknown) = representative_ids
            .iter()
            .find(|id| !tables.representatives.contains_key(*id))
        {
            return Err(StoreError::NotFound {
                entity: "Representative",
                id: *unknown,
            }
            .into());
        }

        let mut wanted: Vec<Uuid> = Vec::with_capacity(representative_ids.len());
        for id in representative_ids {
            if !wanted.contains(id) {
                wanted.push(*id);
            }
        }

        let previous = match tables.students.get_mut(&student_id) {
            Some(student) => std::mem::replace(&mut student.representative_ids, wanted.clone()),
            None => Vec::new(),
        };

        let mut removed = 0;
        for id in previous.iter().filter(|id| !wanted.contains(*id)) {
            if let Some(representative) = tables.representatives.get_mut(id) {
                representative.student_ids.retain(|linked| *linked != student_id);
            }
            removed += 1;
        }
        for id in &wanted {
            if let Some(representative) = tables.representatives.get_mut(id) {
                if !representative.student_ids.contains(&student_id) {
                    representative.student_ids.push(student_id);
                }
            }
        }

        tracing::debug!(%student_id, linked = wanted.len(), removed, "student links replaced");
        Ok(removed)
    }
}

#[async_trait]
impl ReplaceLinks for StudentRepositoryImpl {
    async fn replace_links(
        &self,
        student_id: Uuid,
        representative_ids: &[Uuid],
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        Self::replace_links_impl(self, student_id, representative_ids).await
    }
}
