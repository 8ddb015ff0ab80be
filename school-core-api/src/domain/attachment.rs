use serde::{Deserialize, Serialize};
use std::fmt;

/// The three binary documents carried by a representative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Photo,
    IdentityDocument,
    Signature,
}

impl AttachmentKind {
    pub const ALL: [AttachmentKind; 3] = [
        AttachmentKind::Photo,
        AttachmentKind::IdentityDocument,
        AttachmentKind::Signature,
    ];

    /// Filename used when a stored blob comes back without one
    pub fn default_filename(&self) -> &'static str {
        match self {
            AttachmentKind::Photo => "parent_photo.jpg",
            AttachmentKind::IdentityDocument => "ci.jpg",
            AttachmentKind::Signature => "signature.jpg",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachmentKind::Photo => write!(f, "Photo"),
            AttachmentKind::IdentityDocument => write!(f, "IdentityDocument"),
            AttachmentKind::Signature => write!(f, "Signature"),
        }
    }
}

/// An encoded blob (base64 as produced by the capture layer) plus its filename
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub data: String,
    pub filename: String,
}

impl Attachment {
    pub fn new(data: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            filename: filename.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSet {
    pub photo: Option<Attachment>,
    pub identity_document: Option<Attachment>,
    pub signature: Option<Attachment>,
}

impl AttachmentSet {
    pub fn get(&self, kind: AttachmentKind) -> Option<&Attachment> {
        self.slot(kind).as_ref()
    }

    pub fn set(&mut self, kind: AttachmentKind, attachment: Attachment) {
        *self.slot_mut(kind) = Some(attachment);
    }

    pub fn clear(&mut self, kind: AttachmentKind) {
        *self.slot_mut(kind) = None;
    }

    pub fn is_empty(&self) -> bool {
        AttachmentKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }

    /// Copy of this set with empty blobs dropped and missing filenames
    /// replaced by the per-kind default.
    pub fn rehydrated(&self) -> AttachmentSet {
        let mut out = AttachmentSet::default();
        for kind in AttachmentKind::ALL {
            if let Some(existing) = self.get(kind) {
                if existing.data.is_empty() {
                    continue;
                }
                let filename = if existing.filename.trim().is_empty() {
                    kind.default_filename().to_string()
                } else {
                    existing.filename.clone()
                };
                out.set(kind, Attachment::new(existing.data.clone(), filename));
            }
        }
        out
    }

    fn slot(&self, kind: AttachmentKind) -> &Option<Attachment> {
        match kind {
            AttachmentKind::Photo => &self.photo,
            AttachmentKind::IdentityDocument => &self.identity_document,
            AttachmentKind::Signature => &self.signature,
        }
    }

    fn slot_mut(&mut self, kind: AttachmentKind) -> &mut Option<Attachment> {
        match kind {
            AttachmentKind::Photo => &mut self.photo,
            AttachmentKind::IdentityDocument => &mut self.identity_document,
            AttachmentKind::Signature => &mut self.signature,
        }
    }
}
