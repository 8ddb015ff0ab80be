use async_trait::async_trait;

use crate::domain::{CommitPlan, CommitReceipt};
use crate::error::ApiResult;

/// Applies a representative commit plan as part of saving a student.
///
/// Implementations own the atomicity of the save: creates, updates, unlinks
/// and permanent deletes are one logical operation.
#[async_trait]
pub trait RepresentativeCommitter: Send + Sync {
    /// Apply `plan`
    ///
    /// # Returns
    /// * `Ok(CommitReceipt)` - What was linked, created, unlinked and deleted
    /// * `Err` - Nothing was applied
    async fn commit_representatives(&self, plan: &CommitPlan) -> ApiResult<CommitReceipt>;
}
