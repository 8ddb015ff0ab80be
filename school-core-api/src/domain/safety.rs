use serde::{Deserialize, Serialize};

/// Backend verdict on removing one representative from one student.
///
/// `can_delete` is authoritative for whether permanent erasure may be
/// offered; `has_other_children` only affects prompt wording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionSafetyReport {
    pub can_unlink: bool,
    pub can_delete: bool,
    pub has_other_children: bool,
    pub message: Option<String>,
}

impl DeletionSafetyReport {
    /// Neither unlink nor delete is allowed
    pub fn blocked(message: impl Into<String>) -> Self {
        Self {
            can_unlink: false,
            can_delete: false,
            has_other_children: false,
            message: Some(message.into()),
        }
    }

    /// Unlink allowed, permanent deletion refused
    pub fn unlink_only(message: impl Into<String>, has_other_children: bool) -> Self {
        Self {
            can_unlink: true,
            can_delete: false,
            has_other_children,
            message: Some(message.into()),
        }
    }

    /// Both unlink and permanent deletion allowed
    pub fn deletable() -> Self {
        Self {
            can_unlink: true,
            can_delete: true,
            has_other_children: false,
            message: None,
        }
    }
}
