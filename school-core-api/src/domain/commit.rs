use serde::{Deserialize, Serialize};

use super::ids::{RepresentativeId, StudentId};
use super::representative::{NewRepresentative, PersistedRepresentative};

/// Everything the student save flow must apply to the representative links.
///
/// `student_id` is `None` while registering a student that does not exist yet;
/// in that case `unlink` is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPlan {
    pub student_id: Option<StudentId>,
    /// Stored representatives that stay linked unchanged
    pub keep: Vec<RepresentativeId>,
    /// Stored representatives that stay linked and were edited in the session
    pub update: Vec<PersistedRepresentative>,
    /// Drafted representatives to create and link
    pub create: Vec<NewRepresentative>,
    /// Original links to drop without erasing the representative
    pub unlink: Vec<RepresentativeId>,
    /// Representatives to erase permanently, in the order they were queued
    pub delete: Vec<RepresentativeId>,
}

impl CommitPlan {
    /// Number of representatives the student will be linked to after the commit.
    pub fn linked_count(&self) -> usize {
        self.keep.len() + self.update.len() + self.create.len()
    }
}

/// Result reported by the committer once a plan has been applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    /// Ids now linked to the student: kept, then updated, then created
    pub linked: Vec<RepresentativeId>,
    /// Records created for the drafted representatives, in `CommitPlan::create` order
    pub created: Vec<PersistedRepresentative>,
    pub unlinked: usize,
    pub deleted: usize,
}
