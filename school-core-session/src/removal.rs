//! Removal decision tree for original associations.
//!
//! ```text
//! Idle -> AwaitingOracle -> PromptUnlinkOnly -------------> (unlinked | cancelled)
//!                        \-> PromptUnlinkOrDelete -------> (unlinked | cancelled)
//!                                  \-> ConfirmingPermanentDelete -> (queued | cancelled)
//! ```
//!
//! A blocked or failed safety check ends the removal and leaves the draft
//! list untouched. Transitions here are pure; the session applies their effects
//! to the draft list and the deletion queue.

use serde::{Deserialize, Serialize};
use std::fmt;

use school_core_api::{
    DeletionSafetyReport, LifecycleError, LifecycleResult, PersistedRepresentative,
    Representative, RepresentativeId, StudentId,
};

use crate::draft_list::EntryKey;

/// Handle on one in-flight removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemovalTicket(pub u64);

impl fmt::Display for RemovalTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "removal-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalState {
    Idle,
    AwaitingOracle,
    PromptUnlinkOnly,
    PromptUnlinkOrDelete,
    ConfirmingPermanentDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalChoice {
    UnlinkOnly,
    DeletePermanently,
    ConfirmDelete,
    Cancel,
}

impl RemovalChoice {
    pub fn label(&self) -> &'static str {
        match self {
            RemovalChoice::UnlinkOnly => "Unlink only",
            RemovalChoice::DeletePermanently => "Delete permanently",
            RemovalChoice::ConfirmDelete => "Yes, delete",
            RemovalChoice::Cancel => "Cancel",
        }
    }
}

/// The safety check the caller must run before the removal can continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    pub ticket: RemovalTicket,
    pub representative: PersistedRepresentative,
    pub student_id: StudentId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalStart {
    /// Provisional entry or in-session attachment, removed without a backend check
    Removed { representative: Representative },
    AwaitingOracle(OracleRequest),
}

/// Dialog the operator must answer to continue a removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalPrompt {
    pub ticket: RemovalTicket,
    pub state: RemovalState,
    pub title: String,
    pub message: String,
    pub options: Vec<RemovalChoice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleOutcome {
    Prompt(RemovalPrompt),
    /// The removal was torn down before the check came back; nothing applied
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalResolution {
    /// Entry left the draft list; the link is dropped at save
    Unlinked { id: RepresentativeId },
    /// A second, explicit confirmation is required
    ConfirmationRequired(RemovalPrompt),
    /// Entry left the draft list and the representative is queued for erasure
    ScheduledForDeletion { id: RepresentativeId },
    Cancelled,
}

/// Result of a removal driven end to end by the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed(Representative),
    Prompt(RemovalPrompt),
    Stale,
}

/// Effect the session must apply after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Unlink,
    AskConfirmation,
    Delete,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingRemoval {
    pub ticket: RemovalTicket,
    pub entry: EntryKey,
    pub representative_id: RepresentativeId,
    pub name: String,
    pub state: RemovalState,
    pub report: Option<DeletionSafetyReport>,
}

impl PendingRemoval {
    pub fn new(ticket: RemovalTicket, entry: EntryKey, representative: &PersistedRepresentative) -> Self {
        Self {
            ticket,
            entry,
            representative_id: representative.id,
            name: representative.profile.name.clone(),
            state: RemovalState::AwaitingOracle,
            report: None,
        }
    }

    /// Move out of `AwaitingOracle` according to the backend verdict.
    ///
    /// A report that forbids unlinking is returned as `UnlinkBlocked`;
    /// `can_delete` alone decides between the two prompts.
    pub fn receive(&mut self, report: DeletionSafetyReport) -> LifecycleResult<RemovalPrompt> {
        if self.state != RemovalState::AwaitingOracle {
            return Err(LifecycleError::InvalidState(format!(
                "{} is not waiting for a safety check",
                self.ticket
            )));
        }
        if !report.can_unlink {
            let message = report
                .message
                .clone()
                .unwrap_or_else(|| format!("{} cannot be removed from this student", self.name));
            return Err(LifecycleError::UnlinkBlocked(message));
        }

        self.state = if report.can_delete {
            RemovalState::PromptUnlinkOrDelete
        } else {
            RemovalState::PromptUnlinkOnly
        };
        self.report = Some(report);
        Ok(self.prompt())
    }

    pub fn choose(&mut self, choice: RemovalChoice) -> LifecycleResult<Step> {
        let step = match (self.state, choice) {
            (RemovalState::PromptUnlinkOnly, RemovalChoice::UnlinkOnly)
            | (RemovalState::PromptUnlinkOrDelete, RemovalChoice::UnlinkOnly) => Step::Unlink,
            (RemovalState::PromptUnlinkOrDelete, RemovalChoice::DeletePermanently) => {
                self.state = RemovalState::ConfirmingPermanentDelete;
                Step::AskConfirmation
            }
            (RemovalState::ConfirmingPermanentDelete, RemovalChoice::ConfirmDelete) => Step::Delete,
            (
                RemovalState::PromptUnlinkOnly
                | RemovalState::PromptUnlinkOrDelete
                | RemovalState::ConfirmingPermanentDelete,
                RemovalChoice::Cancel,
            ) => Step::Cancel,
            (state, choice) => {
                return Err(LifecycleError::InvalidState(format!(
                    "{choice:?} is not available while {} is {state:?}",
                    self.ticket
                )))
            }
        };
        Ok(step)
    }

    pub fn prompt(&self) -> RemovalPrompt {
        let has_other_children = self
            .report
            .as_ref()
            .map(|report| report.has_other_children)
            .unwrap_or(false);
        let backend_message = self.report.as_ref().and_then(|report| report.message.clone());
        let name = &self.name;

        let (title, message, options) = match self.state {
            RemovalState::PromptUnlinkOnly => {
                let title = if has_other_children {
                    "Representative shared with other students"
                } else {
                    "Unlink representative"
                };
                let reason = backend_message
                    .unwrap_or_else(|| format!("{name} cannot be deleted permanently."));
                (
                    title.to_string(),
                    format!("{reason}\n\n{name} will be unlinked from this student when the student is saved."),
                    vec![RemovalChoice::UnlinkOnly, RemovalChoice::Cancel],
                )
            }
            RemovalState::PromptUnlinkOrDelete => {
                let context = if has_other_children {
                    format!("{name} is also linked to other students.")
                } else {
                    format!("{name} is not linked to any other student.")
                };
                (
                    "Remove representative".to_string(),
                    format!(
                        "{context}\n\nUnlink only keeps the record. Delete permanently erases it when the student is saved."
                    ),
                    vec![
                        RemovalChoice::UnlinkOnly,
                        RemovalChoice::DeletePermanently,
                        RemovalChoice::Cancel,
                    ],
                )
            }
            RemovalState::ConfirmingPermanentDelete => (
                "Delete permanently?".to_string(),
                format!(
                    "{name} will be removed COMPLETELY from the system when the student is saved. This cannot be undone."
                ),
                vec![RemovalChoice::ConfirmDelete, RemovalChoice::Cancel],
            ),
            RemovalState::Idle | RemovalState::AwaitingOracle => {
                (String::new(), String::new(), Vec::new())
            }
        };

        RemovalPrompt {
            ticket: self.ticket,
            state: self.state,
            title,
            message,
            options,
        }
    }
}
