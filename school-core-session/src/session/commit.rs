use school_core_api::{
    CommitPlan, CommitReceipt, LifecycleError, LifecycleResult, Representative,
    RepresentativeCommitter,
};

use super::{RepresentativeSession, StudentScope};

impl RepresentativeSession {
    /// Split the draft list and the deletion queue into a commit plan.
    ///
    /// An empty draft list is rejected before anything else is checked.
    pub fn prepare_commit(&self) -> LifecycleResult<CommitPlan> {
        if self.drafts.is_empty() {
            return Err(LifecycleError::CommitInvariantViolation);
        }
        self.require_browsing("save the student")?;

        let mut plan = CommitPlan {
            student_id: self.student_id(),
            keep: Vec::new(),
            update: Vec::new(),
            create: Vec::new(),
            unlink: Vec::new(),
            delete: self.deletions.to_vec(),
        };
        for entry in self.drafts.iter() {
            match &entry.representative {
                Representative::New(new) => plan.create.push(new.clone()),
                Representative::Persisted(persisted) if entry.edited => {
                    plan.update.push(persisted.clone())
                }
                Representative::Persisted(persisted) => plan.keep.push(persisted.id),
            }
        }
        plan.unlink = self
            .originals
            .iter()
            .map(|original| original.id)
            .filter(|id| !self.drafts.contains_id(*id) && !self.deletions.contains(*id))
            .collect();

        tracing::info!(
            keep = plan.keep.len(),
            update = plan.update.len(),
            create = plan.create.len(),
            unlink = plan.unlink.len(),
            delete = plan.delete.len(),
            "commit plan built"
        );
        Ok(plan)
    }

    /// Send the commit plan to `committer`.
    ///
    /// On success the saved list becomes the new set of original
    /// associations. On failure the session is left exactly as it was.
    ///
    /// A session opened with [`RepresentativeSession::for_new_student`] has
    /// no student id to check removals against, so after its first save every
    /// entry is still removable without a safety check. Callers must open a
    /// fresh [`RepresentativeSession::for_existing_student`] session for any
    /// further edits once the student has been stored.
    pub async fn commit(
        &mut self,
        committer: &dyn RepresentativeCommitter,
    ) -> LifecycleResult<CommitReceipt> {
        let plan = self.prepare_commit()?;
        let receipt = committer
            .commit_representatives(&plan)
            .await
            .map_err(|err| {
                tracing::warn!(error = %err, "representative commit failed");
                LifecycleError::NetworkFailure(err.to_string())
            })?;

        self.rebase(&plan, &receipt)?;
        tracing::info!(
            linked = receipt.linked.len(),
            created = receipt.created.len(),
            unlinked = receipt.unlinked,
            deleted = receipt.deleted,
            "representative commit applied"
        );
        Ok(receipt)
    }

    fn rebase(&mut self, plan: &CommitPlan, receipt: &CommitReceipt) -> LifecycleResult<()> {
        if receipt.created.len() != plan.create.len() {
            return Err(LifecycleError::InvalidState(format!(
                "committer created {} representative(s) for {} draft(s)",
                receipt.created.len(),
                plan.create.len()
            )));
        }

        let mut created = receipt.created.iter().cloned();
        let mut saved = self.drafts.clone();
        for entry in saved.iter_mut() {
            if let Representative::New(_) = entry.representative {
                if let Some(persisted) = created.next() {
                    entry.representative = Representative::Persisted(persisted);
                }
            }
            entry.edited = false;
        }

        if let StudentScope::Existing(_) = self.scope {
            self.originals = saved
                .iter()
                .filter_map(|entry| entry.representative.as_persisted().cloned())
                .collect();
            self.original_ids = self.originals.iter().map(|rep| rep.id).collect();
        }
        self.drafts = saved;
        self.deletions.clear();
        self.removals.clear();
        self.search.clear();
        self.notice = None;
        Ok(())
    }
}
