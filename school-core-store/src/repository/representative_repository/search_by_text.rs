use async_trait::async_trait;
use school_core_db::models::RepresentativeModel;
use school_core_db::repository::search_by_text::SearchByText;
use std::error::Error;

use super::repo_impl::RepresentativeRepositoryImpl;
use crate::store::StoreError;

impl RepresentativeRepositoryImpl {
    /// Case-insensitive substring match on name or national id, ordered by name.
    ///
    /// Accents are significant: "maría" does not match "Maria".
    pub(super) async fn search_by_text_impl(
        repo: &RepresentativeRepositoryImpl,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RepresentativeModel>, Box<dyn Error + Send + Sync>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let tx = repo.executor.tx.lock().await;
        let tables = tx.as_ref().ok_or(StoreError::TransactionConsumed)?;

        let mut matches: Vec<RepresentativeModel> = tables
            .representatives
            .values()
            .filter(|item| {
                item.name.to_lowercase().contains(&needle)
                    || item.national_id.as_str().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()).then(a.id.cmp(&b.id)));
        matches.truncate(limit);
        Ok(matches)
    }
}

#[async_trait]
impl SearchByText<RepresentativeModel> for RepresentativeRepositoryImpl {
    async fn search_by_text(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<RepresentativeModel>, Box<dyn Error + Send + Sync>> {
        Self::search_by_text_impl(self, query, limit).await
    }
}
