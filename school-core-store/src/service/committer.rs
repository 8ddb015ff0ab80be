//! Applies a representative commit plan to the store.
//!
//! The plan is validated in full before anything is written, then applied
//! in one unit of work: permanent deletes, updates, creates, and finally the
//! student's link set. Any failure rolls the whole plan back.

use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

use school_core_api::{
    ApiError, ApiResult, CommitPlan, CommitReceipt, RepresentativeCommitter, RepresentativeId,
};
use school_core_db::models::RepresentativeModel;
use school_core_db::repository::{
    CreateBatch, DeleteBatch, ExistByIds, LoadBatch, ReplaceLinks, UpdateBatch,
};

use crate::store_repositories::{SchoolRepositories, StoreRepositories};
use crate::utils::to_api_error;

pub struct RepositoryCommitter {
    repositories: StoreRepositories,
}

impl RepositoryCommitter {
    pub fn new(repositories: StoreRepositories) -> Self {
        Self { repositories }
    }

    async fn validate(repos: &SchoolRepositories, plan: &CommitPlan) -> ApiResult<()> {
        if plan.linked_count() == 0 {
            return Err(ApiError::ValidationError(
                "A student must keep at least one representative".to_string(),
            ));
        }

        let linked: HashSet<RepresentativeId> = plan
            .keep
            .iter()
            .copied()
            .chain(plan.update.iter().map(|rep| rep.id))
            .collect();
        if let Some(conflict) = plan
            .delete
            .iter()
            .chain(plan.unlink.iter())
            .find(|id| linked.contains(*id))
        {
            return Err(ApiError::ValidationError(format!(
                "Representative {conflict} cannot stay linked and be removed in the same save"
            )));
        }

        if let Some(student_id) = plan.student_id {
            let students = repos
                .student_repository
                .load_batch(&[student_id.0])
                .await
                .map_err(to_api_error)?;
            if students.iter().all(Option::is_none) {
                return Err(ApiError::NotFound(format!("Student {student_id}")));
            }
        } else if !plan.unlink.is_empty() {
            return Err(ApiError::ValidationError(
                "A student that does not exist yet has nothing to unlink".to_string(),
            ));
        }

        let referenced: Vec<Uuid> = linked
            .iter()
            .chain(plan.unlink.iter())
            .chain(plan.delete.iter())
            .map(|id| id.0)
            .collect();
        let existence = repos
            .representative_repository
            .exist_by_ids(&referenced)
            .await
            .map_err(to_api_error)?;
        if let Some((missing, _)) = existence.iter().find(|(_, exists)| !exists) {
            return Err(ApiError::NotFound(format!("Representative {missing}")));
        }
        Ok(())
    }

    async fn apply(repos: &SchoolRepositories, plan: &CommitPlan) -> ApiResult<CommitReceipt> {
        Self::validate(repos, plan).await?;

        // Conversions first so an oversized value aborts before any write
        let update_ids: Vec<Uuid> = plan.update.iter().map(|rep| rep.id.0).collect();
        let stored = repos
            .representative_repository
            .load_batch(&update_ids)
            .await
            .map_err(to_api_error)?;
        let mut updates = Vec::with_capacity(plan.update.len());
        for (edited, current) in plan.update.iter().zip(stored) {
            let current = current
                .ok_or_else(|| ApiError::NotFound(format!("Representative {}", edited.id)))?;
            // the link set and archive flag stay as stored
            let model = RepresentativeModel::from_profile(
                edited.id.0,
                &edited.profile,
                current.student_ids,
                current.active,
            )
            .map_err(ApiError::ValidationError)?;
            updates.push(model);
        }

        let mut creates = Vec::with_capacity(plan.create.len());
        for draft in &plan.create {
            let model = RepresentativeModel::from_profile(Uuid::new_v4(), &draft.profile, Vec::new(), true)
                .map_err(ApiError::ValidationError)?;
            creates.push(model);
        }

        let delete_ids: Vec<Uuid> = plan.delete.iter().map(|id| id.0).collect();
        let deleted = repos
            .representative_repository
            .delete_batch(&delete_ids)
            .await
            .map_err(to_api_error)?;
        repos
            .representative_repository
            .update_batch(updates)
            .await
            .map_err(to_api_error)?;
        let created = repos
            .representative_repository
            .create_batch(creates)
            .await
            .map_err(to_api_error)?;
        let created_ids: Vec<Uuid> = created.iter().map(|model| model.id).collect();

        let linked: Vec<Uuid> = plan
            .keep
            .iter()
            .map(|id| id.0)
            .chain(update_ids.iter().copied())
            .chain(created_ids.iter().copied())
            .collect();

        let unlinked = match plan.student_id {
            Some(student_id) => repos
                .student_repository
                .replace_links(student_id.0, &linked)
                .await
                .map_err(to_api_error)?,
            None => 0,
        };

        let created = repos
            .representative_repository
            .load_batch(&created_ids)
            .await
            .map_err(to_api_error)?
            .into_iter()
            .flatten()
            .map(|model| model.to_persisted())
            .collect();

        Ok(CommitReceipt {
            linked: linked.into_iter().map(RepresentativeId).collect(),
            created,
            unlinked,
            deleted,
        })
    }
}

#[async_trait]
impl RepresentativeCommitter for RepositoryCommitter {
    async fn commit_representatives(&self, plan: &CommitPlan) -> ApiResult<CommitReceipt> {
        let session = self.repositories.begin().await;
        match Self::apply(session.repos(), plan).await {
            Ok(receipt) => {
                session
                    .commit()
                    .await
                    .map_err(|err| ApiError::DatabaseError(err.to_string()))?;
                tracing::info!(
                    student_id = ?plan.student_id,
                    linked = receipt.linked.len(),
                    created = receipt.created.len(),
                    unlinked = receipt.unlinked,
                    deleted = receipt.deleted,
                    "representative commit applied"
                );
                Ok(receipt)
            }
            Err(err) => {
                session.rollback().await;
                tracing::warn!(student_id = ?plan.student_id, error = %err, "representative commit rolled back");
                Err(err)
            }
        }
    }
}
