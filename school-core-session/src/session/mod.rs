//! The representative lifecycle controller for one student-editing session.
//!
//! A [`RepresentativeSession`] owns the draft list, the edit buffer, the
//! deferred deletion queue, the in-flight removals and the search state.
//! Every operation either applies completely or returns an error with the
//! session unchanged. Backend round trips are split into a synchronous
//! "begin" step and a synchronous "apply" step, so several requests can be
//! in flight while the session itself is only ever touched from one place.

mod commit;
mod edit;
mod remove;
mod search;
#[cfg(test)]
pub(crate) mod test_utils;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use school_core_api::{
    FieldErrors, LifecycleConfig, LifecycleError, LifecycleResult, PersistedRepresentative,
    RepresentativeId, StudentId,
};

use crate::deletion_queue::DeferredDeletionQueue;
use crate::draft_list::DraftList;
use crate::edit_buffer::EditBuffer;
use crate::removal::{PendingRemoval, RemovalTicket};
use crate::search::SearchState;

/// Whether the student being edited already exists in the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StudentScope {
    New,
    Existing(StudentId),
}

/// Editing and list browsing are mutually exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMode {
    Browsing,
    Editing,
}

#[derive(Debug, Clone)]
pub struct RepresentativeSession {
    config: LifecycleConfig,
    scope: StudentScope,
    originals: Vec<PersistedRepresentative>,
    original_ids: BTreeSet<RepresentativeId>,
    drafts: DraftList,
    buffer: Option<EditBuffer>,
    deletions: DeferredDeletionQueue,
    removals: BTreeMap<RemovalTicket, PendingRemoval>,
    next_ticket: u64,
    search: SearchState,
    notice: Option<String>,
}

impl RepresentativeSession {
    /// Session for a student being registered; nothing is associated yet.
    pub fn for_new_student(config: LifecycleConfig) -> Self {
        Self::with_originals(StudentScope::New, Vec::new(), config)
    }

    /// Session for a stored student, seeded with its current representatives.
    pub fn for_existing_student(
        student_id: StudentId,
        originals: Vec<PersistedRepresentative>,
        config: LifecycleConfig,
    ) -> Self {
        Self::with_originals(StudentScope::Existing(student_id), originals, config)
    }

    fn with_originals(
        scope: StudentScope,
        originals: Vec<PersistedRepresentative>,
        config: LifecycleConfig,
    ) -> Self {
        let original_ids = originals.iter().map(|rep| rep.id).collect();
        let drafts = DraftList::from_originals(&originals);
        tracing::debug!(?scope, originals = originals.len(), "representative session opened");
        Self {
            config,
            scope,
            originals,
            original_ids,
            drafts,
            buffer: None,
            deletions: DeferredDeletionQueue::default(),
            removals: BTreeMap::new(),
            next_ticket: 0,
            search: SearchState::default(),
            notice: None,
        }
    }

    pub fn mode(&self) -> SessionMode {
        if self.buffer.is_some() {
            SessionMode::Editing
        } else {
            SessionMode::Browsing
        }
    }

    pub fn scope(&self) -> StudentScope {
        self.scope
    }

    pub fn student_id(&self) -> Option<StudentId> {
        match self.scope {
            StudentScope::New => None,
            StudentScope::Existing(id) => Some(id),
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    pub fn draft_list(&self) -> &DraftList {
        &self.drafts
    }

    pub fn edit_buffer(&self) -> Option<&EditBuffer> {
        self.buffer.as_ref()
    }

    /// Validation errors of the edit buffer, `None` while browsing
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        self.buffer.as_ref().map(|buffer| &buffer.errors)
    }

    pub fn deletion_queue(&self) -> &DeferredDeletionQueue {
        &self.deletions
    }

    pub fn originals(&self) -> &[PersistedRepresentative] {
        &self.originals
    }

    pub fn is_original(&self, id: RepresentativeId) -> bool {
        self.original_ids.contains(&id)
    }

    /// Inline notice from the last rejected attach, cleared by the next successful one
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn search_query(&self) -> &str {
        self.search.query()
    }

    pub fn search_results(&self) -> &[PersistedRepresentative] {
        self.search.results()
    }

    pub fn search_notice(&self) -> Option<&str> {
        self.search.notice()
    }

    /// Abandon every change made in this session.
    ///
    /// The draft list returns to the original associations; the edit buffer,
    /// search state, deletion queue and pending removals are discarded.
    /// Safety checks still in flight come back as stale.
    pub fn reset(&mut self) {
        self.drafts = DraftList::from_originals(&self.originals);
        self.buffer = None;
        self.deletions.clear();
        self.removals.clear();
        self.search.clear();
        self.notice = None;
        tracing::info!(scope = ?self.scope, "representative session reset");
    }

    fn require_browsing(&self, operation: &str) -> LifecycleResult<()> {
        match self.mode() {
            SessionMode::Browsing => Ok(()),
            SessionMode::Editing => Err(LifecycleError::InvalidState(format!(
                "cannot {operation} while a representative is being edited"
            ))),
        }
    }

    fn require_editing(&mut self, operation: &str) -> LifecycleResult<&mut EditBuffer> {
        self.buffer.as_mut().ok_or_else(|| {
            LifecycleError::InvalidState(format!("cannot {operation} without an open representative form"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::removal::{OracleOutcome, RemovalChoice, RemovalOutcome, RemovalStart};
    use crate::session::test_utils::{create_test_persisted, fill_valid_form, ScriptedOracle};
    use school_core_api::{DeletionSafetyReport, RepresentativeField};

    #[test]
    fn test_existing_student_starts_with_originals() {
        let originals = vec![
            create_test_persisted("María Pérez", "12345678"),
            create_test_persisted("José Pérez", "87654321"),
        ];
        let session = RepresentativeSession::for_existing_student(
            StudentId::new(),
            originals.clone(),
            LifecycleConfig::default(),
        );

        assert_eq!(session.mode(), SessionMode::Browsing);
        assert_eq!(
            session.draft_list().ids(),
            originals.iter().map(|rep| rep.id).collect::<Vec<_>>()
        );
        assert!(originals.iter().all(|rep| session.is_original(rep.id)));
        assert!(session.field_errors().is_none());
    }

    #[tokio::test]
    async fn test_reset_discards_everything_and_stales_pending_checks() {
        let original = create_test_persisted("María Pérez", "12345678");
        let mut session = RepresentativeSession::for_existing_student(
            StudentId::new(),
            vec![original.clone(), create_test_persisted("José Pérez", "87654321")],
            LifecycleConfig::default(),
        );

        let RemovalStart::AwaitingOracle(request) = session.begin_remove(0).unwrap() else {
            panic!("original association must go through the safety check");
        };
        session.begin_new().unwrap();
        fill_valid_form(&mut session, "Ana Gómez");
        session.update_field(RepresentativeField::Email, "bad").unwrap();
        session.update_search_query("mar");

        session.reset();

        assert_eq!(session.mode(), SessionMode::Browsing);
        assert_eq!(session.draft_list().len(), 2);
        assert!(session.deletion_queue().is_empty());
        assert_eq!(session.search_query(), "");

        let late = session.resolve_oracle(request.ticket, Ok(DeletionSafetyReport::deletable()));
        assert_eq!(late, Ok(OracleOutcome::Stale));
        assert_eq!(session.draft_list().ids()[0], original.id);
    }

    #[tokio::test]
    async fn test_reset_restores_unlinked_and_queued_originals() {
        let kept = create_test_persisted("María Pérez", "12345678");
        let unlinked = create_test_persisted("José Pérez", "87654321");
        let deleted = create_test_persisted("Rosa Díaz", "11223344");
        let mut session = RepresentativeSession::for_existing_student(
            StudentId::new(),
            vec![kept.clone(), unlinked.clone(), deleted.clone()],
            LifecycleConfig::default(),
        );

        let shared = ScriptedOracle::new(Ok(DeletionSafetyReport::unlink_only("shared", true)));
        let RemovalOutcome::Prompt(prompt) = session.request_remove(1, &shared).await.unwrap() else {
            panic!("expected a prompt");
        };
        session.choose(prompt.ticket, RemovalChoice::UnlinkOnly).unwrap();

        let deletable = ScriptedOracle::new(Ok(DeletionSafetyReport::deletable()));
        let RemovalOutcome::Prompt(prompt) = session.request_remove(1, &deletable).await.unwrap() else {
            panic!("expected a prompt");
        };
        session.choose(prompt.ticket, RemovalChoice::DeletePermanently).unwrap();
        session.choose(prompt.ticket, RemovalChoice::ConfirmDelete).unwrap();
        assert_eq!(session.draft_list().ids(), vec![kept.id]);
        assert_eq!(session.deletion_queue().to_vec(), vec![deleted.id]);

        session.reset();

        assert_eq!(
            session.draft_list().ids(),
            vec![kept.id, unlinked.id, deleted.id]
        );
        assert!(session.deletion_queue().is_empty());
        let plan = session.prepare_commit().unwrap();
        assert!(plan.unlink.is_empty());
        assert!(plan.delete.is_empty());
        assert_eq!(plan.keep, vec![kept.id, unlinked.id, deleted.id]);
    }
}
