use async_trait::async_trait;

use school_core_api::{ApiResult, LifecycleConfig, PersistedRepresentative, RepresentativeSearch};
use school_core_db::repository::SearchByText;

use crate::store_repositories::StoreRepositories;
use crate::utils::to_api_error;

/// Representative search over the committed store state.
pub struct RepositorySearch {
    repositories: StoreRepositories,
    limit: usize,
}

impl RepositorySearch {
    pub fn new(repositories: StoreRepositories, config: &LifecycleConfig) -> Self {
        Self {
            repositories,
            limit: config.search_result_limit,
        }
    }
}

#[async_trait]
impl RepresentativeSearch for RepositorySearch {
    async fn search_representatives(&self, query: &str) -> ApiResult<Vec<PersistedRepresentative>> {
        let repos = self.repositories.read_only();
        let models = repos
            .representative_repository
            .search_by_text(query, self.limit)
            .await
            .map_err(to_api_error)?;
        tracing::debug!(query, matches = models.len(), "representative search");
        Ok(models.iter().map(|model| model.to_persisted()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_utils::create_test_representative;
    use crate::test_helper::setup_shared_repos;
    use school_core_db::repository::CreateBatch;

    #[tokio::test]
    async fn test_search_returns_persisted_representatives_capped() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let repositories = setup_shared_repos();
        let session = repositories.begin().await;
        let items: Vec<_> = (0..5)
            .map(|i| create_test_representative(&format!("Marta Gil {i}"), &format!("1000000{i}")))
            .collect();
        session
            .repos()
            .representative_repository
            .create_batch(items.clone())
            .await?;
        session.commit().await?;

        let config = LifecycleConfig {
            search_result_limit: 3,
            ..LifecycleConfig::default()
        };
        let search = RepositorySearch::new(repositories, &config);

        let found = search.search_representatives("marta").await?;
        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|rep| rep.active));

        let by_id = search.search_representatives("10000004").await?;
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id.0, items[4].id);

        Ok(())
    }
}
