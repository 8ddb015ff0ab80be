use async_trait::async_trait;

use crate::models::identifiable::Identifiable;

/// Repository trait for free-text lookup
///
/// Implementations decide which columns participate in the match. Results
/// are capped at `limit`.
#[async_trait]
pub trait SearchByText<T: Identifiable>: Send + Sync {
    async fn search_by_text(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<T>, Box<dyn std::error::Error + Send + Sync>>;
}
