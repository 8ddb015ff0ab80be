use async_trait::async_trait;

use crate::domain::PersistedRepresentative;
use crate::error::ApiResult;

/// Backend lookup of stored representatives by a name or identity fragment.
///
/// No pagination contract is assumed; implementations return a small,
/// bounded result set.
///
/// # Example
/// ```ignore
/// #[async_trait]
/// impl RepresentativeSearch for RepositorySearch {
///     async fn search_representatives(&self, query: &str) -> ApiResult<Vec<PersistedRepresentative>> {
///         // Implementation
///     }
/// }
/// ```
#[async_trait]
pub trait RepresentativeSearch: Send + Sync {
    /// Search stored representatives
    ///
    /// # Arguments
    /// * `query` - Free text matched against name or national id
    ///
    /// # Returns
    /// * `Ok(Vec<PersistedRepresentative>)` - Matches, possibly empty
    /// * `Err` - The backend could not be reached or rejected the query
    async fn search_representatives(&self, query: &str) -> ApiResult<Vec<PersistedRepresentative>>;
}
