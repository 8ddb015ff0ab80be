use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of a stored representative (parent or guardian)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RepresentativeId(pub Uuid);

/// Identifier of a stored student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub Uuid);

impl RepresentativeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl StudentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RepresentativeId {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for StudentId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RepresentativeId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<Uuid> for StudentId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for RepresentativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
