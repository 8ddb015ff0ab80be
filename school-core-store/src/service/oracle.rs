//! Deletion-safety decision over the stored associations.
//!
//! Checks run in order and the first match wins:
//! 1. the representative no longer exists
//! 2. it answers for an active enrollment of the student being edited
//! 3. it is linked to no student at all
//! 4. it answers for an active enrollment of another linked student
//! 5. it is linked to other students
//! 6. otherwise it may be unlinked or erased

use async_trait::async_trait;
use uuid::Uuid;

use school_core_api::{
    ApiResult, DeletionSafetyOracle, DeletionSafetyReport, PersistedRepresentative, StudentId,
};
use school_core_db::models::{RepresentativeModel, StudentModel};
use school_core_db::repository::{FindByStudentId, LoadBatch};

use crate::store_repositories::{SchoolRepositories, StoreRepositories};
use crate::utils::to_api_error;

pub struct RepositoryDeletionOracle {
    repositories: StoreRepositories,
}

impl RepositoryDeletionOracle {
    pub fn new(repositories: StoreRepositories) -> Self {
        Self { repositories }
    }

    async fn pinned_by_active_enrollment(
        repos: &SchoolRepositories,
        representative_id: Uuid,
        student_id: Uuid,
    ) -> ApiResult<bool> {
        let enrollments = repos
            .enrollment_repository
            .find_by_student_id(student_id)
            .await
            .map_err(to_api_error)?;
        Ok(enrollments
            .iter()
            .any(|enrollment| enrollment.pins(representative_id)))
    }

    async fn student_name(repos: &SchoolRepositories, student_id: Uuid) -> ApiResult<String> {
        let loaded: Vec<Option<StudentModel>> = repos
            .student_repository
            .load_batch(&[student_id])
            .await
            .map_err(to_api_error)?;
        Ok(loaded
            .into_iter()
            .flatten()
            .next()
            .map(|student| student.name.to_string())
            .unwrap_or_else(|| "this student".to_string()))
    }
}

#[async_trait]
impl DeletionSafetyOracle for RepositoryDeletionOracle {
    async fn can_delete_representative(
        &self,
        representative: &PersistedRepresentative,
        student_id: StudentId,
    ) -> ApiResult<DeletionSafetyReport> {
        let repos = self.repositories.read_only();
        let loaded: Vec<Option<RepresentativeModel>> = repos
            .representative_repository
            .load_batch(&[representative.id.0])
            .await
            .map_err(to_api_error)?;
        let Some(stored) = loaded.into_iter().flatten().next() else {
            tracing::info!(representative_id = %representative.id, "safety check on missing representative");
            return Ok(DeletionSafetyReport::blocked("Representative not found"));
        };
        let name = stored.name.as_str();

        if Self::pinned_by_active_enrollment(&repos, stored.id, student_id.0).await? {
            let student = Self::student_name(&repos, student_id.0).await?;
            return Ok(DeletionSafetyReport::blocked(format!(
                "{name} is the responsible representative on an active enrollment of {student} and cannot be removed"
            )));
        }

        if stored.student_ids.is_empty() {
            return Ok(DeletionSafetyReport::deletable());
        }

        let others: Vec<Uuid> = stored
            .student_ids
            .iter()
            .copied()
            .filter(|id| *id != student_id.0)
            .collect();

        for other in &others {
            if Self::pinned_by_active_enrollment(&repos, stored.id, *other).await? {
                let student = Self::student_name(&repos, *other).await?;
                return Ok(DeletionSafetyReport::unlink_only(
                    format!(
                        "{name} is the responsible representative on an active enrollment of {student}; it can only be unlinked"
                    ),
                    true,
                ));
            }
        }

        if !others.is_empty() {
            return Ok(DeletionSafetyReport::unlink_only(
                format!(
                    "{name} is also the representative of {} other student(s); it can only be unlinked",
                    others.len()
                ),
                true,
            ));
        }

        Ok(DeletionSafetyReport::deletable())
    }
}
