use serde::{Deserialize, Serialize};

use school_core_api::{AttachmentSet, FieldErrors, RepresentativeForm, RepresentativeRecord};

use crate::draft_list::{DraftEntry, EntryKey};

/// What an [`EditBuffer`] will write to when it is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditTarget {
    /// Append a new entry
    New,
    /// Replace the entry with this key
    Existing(EntryKey),
}

/// The single representative being created or modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBuffer {
    pub target: EditTarget,
    pub form: RepresentativeForm,
    /// Transient attachments; they reach the entry only on commit
    pub attachments: AttachmentSet,
    pub errors: FieldErrors,
}

impl EditBuffer {
    pub fn blank() -> Self {
        Self {
            target: EditTarget::New,
            form: RepresentativeForm::default(),
            attachments: AttachmentSet::default(),
            errors: FieldErrors::default(),
        }
    }

    /// Rehydrate the form and attachment state from a list entry.
    pub fn from_entry(entry: &DraftEntry) -> Self {
        let profile = entry.representative.profile();
        Self {
            target: EditTarget::Existing(entry.key),
            form: profile.to_form(),
            attachments: profile.attachments.rehydrated(),
            errors: FieldErrors::default(),
        }
    }
}
