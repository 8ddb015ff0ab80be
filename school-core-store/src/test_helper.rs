//! Test helper module for unit-of-work based test isolation
//!
//! Every test context runs inside a unit of work over a fresh store, so
//! tests never observe each other's data and need no cleanup.

use crate::store::InMemoryStore;
use crate::store_repositories::{SchoolRepositories, StoreRepositories, StoreSession};

/// Test context holding an open unit of work
///
/// Nothing is committed unless the test commits the session explicitly.
pub struct TestContext {
    pub repositories: StoreRepositories,
    pub session: StoreSession,
}

impl TestContext {
    pub fn repos(&self) -> &SchoolRepositories {
        self.session.repos()
    }
}

/// Setup a test context with an open unit of work over an empty store
///
/// # Example
///
/// ```ignore
/// #[tokio::test]
/// async fn test_example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
///     let ctx = setup_test_context().await;
///     let repo = &ctx.repos().representative_repository;
///
///     // Perform test operations...
///     // All changes are discarded when ctx is dropped
///
///     Ok(())
/// }
/// ```
pub async fn setup_test_context() -> TestContext {
    let repositories = StoreRepositories::new(InMemoryStore::new());
    let session = repositories.begin().await;
    TestContext {
        repositories,
        session,
    }
}

/// Setup shared repositories for tests that seed data in one unit of work
/// and exercise it from another
pub fn setup_shared_repos() -> StoreRepositories {
    StoreRepositories::new(InMemoryStore::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_utils::create_test_representative;
    use school_core_db::repository::{CreateBatch, LoadBatch};

    #[tokio::test]
    async fn test_context_discards_changes_on_drop() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let repositories = setup_shared_repos();
        let item = create_test_representative("María Pérez", "12345678");
        {
            let session = repositories.begin().await;
            session
                .repos()
                .representative_repository
                .create_batch(vec![item.clone()])
                .await?;
            let loaded = session.repos().representative_repository.load_batch(&[item.id]).await?;
            assert!(loaded[0].is_some());
        }

        let session = repositories.begin().await;
        let loaded = session.repos().representative_repository.load_batch(&[item.id]).await?;
        assert!(loaded[0].is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_committed_changes_are_visible_to_later_sessions() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let repositories = setup_shared_repos();
        let item = create_test_representative("María Pérez", "12345678");

        let session = repositories.begin().await;
        session
            .repos()
            .representative_repository
            .create_batch(vec![item.clone()])
            .await?;
        session.commit().await?;

        let loaded = repositories
            .read_only()
            .representative_repository
            .load_batch(&[item.id])
            .await?;
        assert_eq!(loaded, vec![Some(item)]);

        Ok(())
    }
}
