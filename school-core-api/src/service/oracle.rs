use async_trait::async_trait;

use crate::domain::{DeletionSafetyReport, PersistedRepresentative, StudentId};
use crate::error::ApiResult;

/// Authoritative backend check run before an original association is removed.
///
/// Only stored representatives can be checked; drafts never reach the backend.
/// Must be called exactly once per removal attempt of an original association.
#[async_trait]
pub trait DeletionSafetyOracle: Send + Sync {
    /// Report whether `representative` may be unlinked from `student_id`
    /// and whether it may be erased permanently
    ///
    /// # Returns
    /// * `Ok(DeletionSafetyReport)` - The verdict
    /// * `Err` - The check could not be completed; callers must treat this as blocked
    async fn can_delete_representative(
        &self,
        representative: &PersistedRepresentative,
        student_id: StudentId,
    ) -> ApiResult<DeletionSafetyReport>;
}
