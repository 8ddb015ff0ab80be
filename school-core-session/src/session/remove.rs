use school_core_api::{
    ApiResult, DeletionSafetyOracle, DeletionSafetyReport, LifecycleError, LifecycleResult,
    Representative,
};

use super::{RepresentativeSession, StudentScope};
use crate::removal::{
    OracleOutcome, OracleRequest, PendingRemoval, RemovalChoice, RemovalOutcome,
    RemovalResolution, RemovalStart, RemovalState, RemovalTicket, Step,
};

impl RepresentativeSession {
    /// Start removing the entry at `index`.
    ///
    /// Drafts and representatives attached during this session leave the
    /// list at once. An original association is only marked as pending and
    /// an [`OracleRequest`] is returned; nothing changes until the safety
    /// check is resolved and the operator chooses.
    pub fn begin_remove(&mut self, index: usize) -> LifecycleResult<RemovalStart> {
        self.require_browsing("remove a representative")?;
        let entry = self
            .drafts
            .get(index)
            .ok_or_else(|| LifecycleError::InvalidState(format!("no representative at position {index}")))?;
        let key = entry.key;
        if self.removals.values().any(|removal| removal.entry == key) {
            return Err(LifecycleError::InvalidState(format!(
                "removal of entry {key} is already in progress"
            )));
        }

        let original = match &entry.representative {
            Representative::Persisted(persisted) if self.original_ids.contains(&persisted.id) => {
                Some(persisted.clone())
            }
            _ => None,
        };

        let (Some(representative), StudentScope::Existing(student_id)) = (original, self.scope) else {
            let removed = self
                .drafts
                .remove_by_key(key)
                .ok_or_else(|| LifecycleError::InvalidState(format!("entry {key} is no longer in the list")))?;
            tracing::info!(entry = %key, representative_id = ?removed.representative.id(), "provisional representative removed");
            return Ok(RemovalStart::Removed {
                representative: removed.representative,
            });
        };

        let ticket = RemovalTicket(self.next_ticket);
        self.next_ticket += 1;
        self.removals
            .insert(ticket, PendingRemoval::new(ticket, key, &representative));
        tracing::debug!(%ticket, representative_id = %representative.id, %student_id, "awaiting deletion safety check");

        Ok(RemovalStart::AwaitingOracle(OracleRequest {
            ticket,
            representative,
            student_id,
        }))
    }

    /// Apply the safety check result for `ticket`.
    ///
    /// A check that cannot be completed is treated as blocked. Results for a
    /// ticket torn down by [`RepresentativeSession::reset`] are reported as
    /// stale and never applied.
    pub fn resolve_oracle(
        &mut self,
        ticket: RemovalTicket,
        result: ApiResult<DeletionSafetyReport>,
    ) -> LifecycleResult<OracleOutcome> {
        let Some(pending) = self.removals.get_mut(&ticket) else {
            tracing::debug!(%ticket, "safety check for a torn down removal discarded");
            return Ok(OracleOutcome::Stale);
        };

        let report = match result {
            Ok(report) => report,
            Err(err) => {
                if pending.state != RemovalState::AwaitingOracle {
                    return Err(LifecycleError::InvalidState(format!(
                        "{ticket} is not waiting for a safety check"
                    )));
                }
                self.removals.remove(&ticket);
                tracing::warn!(%ticket, error = %err, "safety check failed, removal blocked");
                return Err(LifecycleError::NetworkFailure(
                    self.config.oracle_failure_message.clone(),
                ));
            }
        };

        match pending.receive(report) {
            Ok(prompt) => {
                tracing::info!(%ticket, state = ?prompt.state, "removal awaiting operator choice");
                Ok(OracleOutcome::Prompt(prompt))
            }
            Err(err @ LifecycleError::UnlinkBlocked(_)) => {
                self.removals.remove(&ticket);
                tracing::info!(%ticket, reason = %err, "removal blocked by safety check");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Answer the prompt of `ticket`.
    ///
    /// Permanent deletion takes two answers: `DeletePermanently`, then
    /// `ConfirmDelete`. An answer not offered by the current prompt is
    /// rejected and the prompt stays open.
    pub fn choose(
        &mut self,
        ticket: RemovalTicket,
        choice: RemovalChoice,
    ) -> LifecycleResult<RemovalResolution> {
        let pending = self
            .removals
            .get_mut(&ticket)
            .ok_or_else(|| LifecycleError::InvalidState(format!("{ticket} is not in progress")))?;
        let step = pending.choose(choice)?;
        let entry = pending.entry;
        let id = pending.representative_id;

        match step {
            Step::AskConfirmation => Ok(RemovalResolution::ConfirmationRequired(pending.prompt())),
            Step::Cancel => {
                self.removals.remove(&ticket);
                tracing::debug!(%ticket, "removal cancelled");
                Ok(RemovalResolution::Cancelled)
            }
            Step::Unlink => {
                self.removals.remove(&ticket);
                self.drafts.remove_by_key(entry);
                tracing::info!(%ticket, representative_id = %id, "representative will be unlinked at save");
                Ok(RemovalResolution::Unlinked { id })
            }
            Step::Delete => {
                self.removals.remove(&ticket);
                self.drafts.remove_by_key(entry);
                self.deletions.insert(id);
                tracing::info!(%ticket, representative_id = %id, "representative queued for permanent deletion");
                Ok(RemovalResolution::ScheduledForDeletion { id })
            }
        }
    }

    /// Remove the entry at `index`, running the safety check when required.
    pub async fn request_remove(
        &mut self,
        index: usize,
        oracle: &dyn DeletionSafetyOracle,
    ) -> LifecycleResult<RemovalOutcome> {
        match self.begin_remove(index)? {
            RemovalStart::Removed { representative } => Ok(RemovalOutcome::Removed(representative)),
            RemovalStart::AwaitingOracle(request) => {
                let result = oracle
                    .can_delete_representative(&request.representative, request.student_id)
                    .await;
                match self.resolve_oracle(request.ticket, result)? {
                    OracleOutcome::Prompt(prompt) => Ok(RemovalOutcome::Prompt(prompt)),
                    OracleOutcome::Stale => Ok(RemovalOutcome::Stale),
                }
            }
        }
    }

    /// Current state of `ticket`; `Idle` once finished or unknown
    pub fn removal_state(&self, ticket: RemovalTicket) -> RemovalState {
        self.removals
            .get(&ticket)
            .map(|pending| pending.state)
            .unwrap_or(RemovalState::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_utils::{
        create_test_persisted, fill_valid_form, ScriptedOracle,
    };
    use school_core_api::{
        ApiError, ErrorCode, LifecycleConfig, PersistedRepresentative, RepresentativeId,
        StudentId,
    };

    fn session_with(originals: Vec<PersistedRepresentative>) -> RepresentativeSession {
        RepresentativeSession::for_existing_student(StudentId::new(), originals, LifecycleConfig::default())
    }

    fn ids(session: &RepresentativeSession) -> Vec<RepresentativeId> {
        session.draft_list().ids()
    }

    #[tokio::test]
    async fn test_provisional_entry_is_removed_without_oracle() {
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::deletable()));
        let mut session = session_with(vec![create_test_persisted("María Pérez", "12345678")]);
        session.begin_new().unwrap();
        fill_valid_form(&mut session, "Ana Gómez");
        session.add_or_update().unwrap();

        let outcome = session.request_remove(1, &oracle).await.unwrap();

        assert!(matches!(outcome, RemovalOutcome::Removed(Representative::New(_))));
        assert_eq!(session.draft_list().len(), 1);
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_in_session_attachment_is_removed_without_oracle_or_queue() {
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::deletable()));
        let original = create_test_persisted("María Pérez", "12345678");
        let mut session = session_with(vec![original.clone()]);
        session
            .attach_existing(create_test_persisted("José Rondón", "87654321"))
            .unwrap();

        let outcome = session.request_remove(1, &oracle).await.unwrap();

        assert!(matches!(outcome, RemovalOutcome::Removed(Representative::Persisted(_))));
        assert_eq!(ids(&session), vec![original.id]);
        assert!(session.deletion_queue().is_empty());
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_blocked_removal_leaves_list_identical() {
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::blocked(
            "María Pérez is responsible for an active enrollment",
        )));
        let mut session = session_with(vec![
            create_test_persisted("María Pérez", "12345678"),
            create_test_persisted("José Pérez", "87654321"),
        ]);
        let before = ids(&session);

        let err = session.request_remove(0, &oracle).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::UnlinkBlocked);
        assert_eq!(err.to_string(), "María Pérez is responsible for an active enrollment");
        assert_eq!(ids(&session), before);
        assert_eq!(oracle.calls(), 1);
    }

    #[tokio::test]
    async fn test_oracle_failure_fails_safe() {
        let oracle = ScriptedOracle::new(Err(ApiError::NetworkError("connection reset".to_string())));
        let mut session = session_with(vec![create_test_persisted("María Pérez", "12345678")]);
        let before = ids(&session);

        let err = session.request_remove(0, &oracle).await.unwrap_err();

        assert_eq!(
            err,
            LifecycleError::NetworkFailure(LifecycleConfig::default().oracle_failure_message)
        );
        assert_eq!(ids(&session), before);
        assert!(session.deletion_queue().is_empty());
    }

    #[tokio::test]
    async fn test_scenario_unlink_only() {
        let original = create_test_persisted("María Pérez", "12345678");
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::unlink_only(
            "María Pérez is also the representative of 1 other student(s)",
            true,
        )));
        let mut session = session_with(vec![original.clone()]);

        let RemovalOutcome::Prompt(prompt) = session.request_remove(0, &oracle).await.unwrap() else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.state, RemovalState::PromptUnlinkOnly);
        assert_eq!(session.removal_state(prompt.ticket), RemovalState::PromptUnlinkOnly);
        assert_eq!(oracle.requests(), vec![(original.id, session.student_id().unwrap())]);

        let resolution = session.choose(prompt.ticket, RemovalChoice::UnlinkOnly).unwrap();

        assert_eq!(resolution, RemovalResolution::Unlinked { id: original.id });
        assert!(session.draft_list().is_empty());
        assert!(session.deletion_queue().is_empty());
        assert_eq!(session.removal_state(prompt.ticket), RemovalState::Idle);
    }

    #[tokio::test]
    async fn test_scenario_delete_permanently_with_two_confirmations() {
        let original = create_test_persisted("María Pérez", "12345678");
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::deletable()));
        let mut session = session_with(vec![original.clone()]);

        let RemovalOutcome::Prompt(prompt) = session.request_remove(0, &oracle).await.unwrap() else {
            panic!("expected a prompt");
        };
        assert_eq!(prompt.state, RemovalState::PromptUnlinkOrDelete);

        let first = session
            .choose(prompt.ticket, RemovalChoice::DeletePermanently)
            .unwrap();
        assert!(matches!(first, RemovalResolution::ConfirmationRequired(_)));
        // one confirmation is not enough
        assert_eq!(ids(&session), vec![original.id]);
        assert!(session.deletion_queue().is_empty());

        let second = session.choose(prompt.ticket, RemovalChoice::ConfirmDelete).unwrap();

        assert_eq!(second, RemovalResolution::ScheduledForDeletion { id: original.id });
        assert!(session.draft_list().is_empty());
        assert_eq!(session.deletion_queue().to_vec(), vec![original.id]);
    }

    #[tokio::test]
    async fn test_cancel_at_confirmation_keeps_everything() {
        let original = create_test_persisted("María Pérez", "12345678");
        let oracle = ScriptedOracle::new(Ok(DeletionSafetyReport::deletable()));
        let mut session = session_with(vec![original.clone()]);

        let RemovalOutcome::Prompt(prompt) = session.request_remove(0, &oracle).await.unwrap() else {
            panic!("expected a prompt");
        };
        session
            .choose(prompt.ticket, RemovalChoice::DeletePermanently)
            .unwrap();
        let resolution = session.choose(prompt.ticket, RemovalChoice::Cancel).unwrap();

        assert_eq!(resolution, RemovalResolution::Cancelled);
        assert_eq!(ids(&session), vec![original.id]);
        assert!(session.deletion_queue().is_empty());
        tokio_test::assert_err!(session.choose(prompt.ticket, RemovalChoice::ConfirmDelete));
    }

    #[test]
    fn test_concurrent_removals_use_stable_identity() {
        let first = create_test_persisted("María Pérez", "12345678");
        let second = create_test_persisted("José Pérez", "87654321");
        let third = create_test_persisted("Rosa Díaz", "11223344");
        let mut session = session_with(vec![first.clone(), second.clone(), third.clone()]);

        let RemovalStart::AwaitingOracle(for_first) = session.begin_remove(0).unwrap() else {
            panic!("expected a safety check");
        };
        let RemovalStart::AwaitingOracle(for_third) = session.begin_remove(2).unwrap() else {
            panic!("expected a safety check");
        };
        tokio_test::assert_err!(session.begin_remove(0));

        // responses arrive in reverse order
        let OracleOutcome::Prompt(third_prompt) = session
            .resolve_oracle(for_third.ticket, Ok(DeletionSafetyReport::deletable()))
            .unwrap()
        else {
            panic!("expected a prompt");
        };
        let OracleOutcome::Prompt(first_prompt) = session
            .resolve_oracle(for_first.ticket, Ok(DeletionSafetyReport::deletable()))
            .unwrap()
        else {
            panic!("expected a prompt");
        };

        session.choose(first_prompt.ticket, RemovalChoice::UnlinkOnly).unwrap();
        // third entry now sits at index 1; its ticket still targets it
        session.choose(third_prompt.ticket, RemovalChoice::UnlinkOnly).unwrap();

        assert_eq!(ids(&session), vec![second.id]);
    }

    #[test]
    fn test_entry_pending_removal_cannot_be_edited() {
        let mut session = session_with(vec![create_test_persisted("María Pérez", "12345678")]);
        let RemovalStart::AwaitingOracle(request) = session.begin_remove(0).unwrap() else {
            panic!("expected a safety check");
        };
        assert_eq!(session.removal_state(request.ticket), RemovalState::AwaitingOracle);
        tokio_test::assert_err!(session.start_edit(0));
        tokio_test::assert_err!(session.choose(request.ticket, RemovalChoice::UnlinkOnly));
    }

    #[test]
    fn test_new_student_never_needs_safety_check() {
        let mut session = RepresentativeSession::for_new_student(LifecycleConfig::default());
        session
            .attach_existing(create_test_persisted("María Pérez", "12345678"))
            .unwrap();
        let start = session.begin_remove(0).unwrap();
        assert!(matches!(start, RemovalStart::Removed { .. }));
        assert!(session.draft_list().is_empty());
    }
}
