use school_core_api::{
    Attachment, AttachmentKind, LifecycleError, LifecycleResult, NewRepresentative,
    PersistedRepresentative, Representative, RepresentativeField, RepresentativeRecord,
};

use super::RepresentativeSession;
use crate::draft_list::EntryKey;
use crate::edit_buffer::{EditBuffer, EditTarget};

impl RepresentativeSession {
    /// Open an empty form for a new representative.
    pub fn begin_new(&mut self) -> LifecycleResult<()> {
        self.require_browsing("create a representative")?;
        self.buffer = Some(EditBuffer::blank());
        Ok(())
    }

    /// Store a raw field value and re-validate that field.
    pub fn update_field(&mut self, field: RepresentativeField, value: &str) -> LifecycleResult<()> {
        let buffer = self.require_editing("edit a field")?;
        buffer.form.set(field, value);
        buffer
            .errors
            .record(field, school_core_api::validation::validate(field, value));
        Ok(())
    }

    pub fn set_attachment(&mut self, kind: AttachmentKind, attachment: Attachment) -> LifecycleResult<()> {
        let buffer = self.require_editing("attach a document")?;
        buffer.attachments.set(kind, attachment);
        Ok(())
    }

    pub fn clear_attachment(&mut self, kind: AttachmentKind) -> LifecycleResult<()> {
        let buffer = self.require_editing("remove a document")?;
        buffer.attachments.clear(kind);
        Ok(())
    }

    /// Commit the edit buffer into the draft list.
    ///
    /// Appends for a new representative, replaces the edited entry otherwise.
    /// Every invalid field is reported at once and the list is left unchanged.
    pub fn add_or_update(&mut self) -> LifecycleResult<EntryKey> {
        let buffer = self.require_editing("save a representative")?;
        let target = buffer.target;
        let profile = match buffer.form.to_profile(&buffer.attachments) {
            Ok(profile) => profile,
            Err(errors) => {
                buffer.errors = errors.clone();
                tracing::debug!(invalid = errors.len(), "representative form rejected");
                return Err(LifecycleError::ValidationFailed(errors));
            }
        };

        let key = match target {
            EditTarget::New => self
                .drafts
                .push(Representative::New(NewRepresentative { profile })),
            EditTarget::Existing(key) => {
                let current = self
                    .drafts
                    .by_key(key)
                    .map(|entry| entry.representative.clone())
                    .ok_or_else(|| {
                        LifecycleError::InvalidState(format!("entry {key} is no longer in the list"))
                    })?;
                self.drafts.replace(key, current.with_profile(profile));
                key
            }
        };

        self.buffer = None;
        tracing::info!(entry = %key, total = self.drafts.len(), "representative saved to draft list");
        Ok(key)
    }

    /// Associate a stored representative found by search.
    ///
    /// An id already in the list is rejected with an inline notice and no
    /// state change.
    pub fn attach_existing(&mut self, representative: PersistedRepresentative) -> LifecycleResult<EntryKey> {
        self.require_browsing("attach a representative")?;
        if self.drafts.contains_id(representative.id) {
            tracing::debug!(representative_id = %representative.id, "duplicate association rejected");
            self.notice = Some(format!(
                "{} is already associated with this student",
                representative.display_name()
            ));
            return Err(LifecycleError::DuplicateAssociation(representative.id));
        }
        if self.deletions.contains(representative.id) {
            return Err(LifecycleError::InvalidState(format!(
                "{} is queued for permanent deletion",
                representative.display_name()
            )));
        }

        let id = representative.id;
        let key = self.drafts.push(Representative::Persisted(representative));
        self.search.clear();
        self.notice = None;
        tracing::info!(representative_id = %id, entry = %key, "existing representative attached");
        Ok(key)
    }

    /// Open the entry at `index` in the edit buffer.
    ///
    /// Archived records and entries with a removal in progress cannot be edited.
    pub fn start_edit(&mut self, index: usize) -> LifecycleResult<()> {
        self.require_browsing("edit another representative")?;
        let entry = self
            .drafts
            .get(index)
            .ok_or_else(|| LifecycleError::InvalidState(format!("no representative at position {index}")))?;
        if entry.representative.is_read_only() {
            return Err(LifecycleError::InvalidState(format!(
                "{} is archived and cannot be edited",
                entry.representative.display_name()
            )));
        }
        if self.removals.values().any(|removal| removal.entry == entry.key) {
            return Err(LifecycleError::InvalidState(format!(
                "{} is being removed",
                entry.representative.display_name()
            )));
        }

        self.buffer = Some(EditBuffer::from_entry(entry));
        Ok(())
    }

    /// Discard the edit buffer and return to the list. No-op while browsing.
    pub fn cancel_edit(&mut self) {
        if self.buffer.take().is_some() {
            tracing::debug!("representative edit cancelled");
        }
    }
}
