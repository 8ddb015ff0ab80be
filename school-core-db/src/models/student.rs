use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

/// # Documentation
/// Storage model for a student, reduced to what the representative
/// association needs: the display name and the link set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentModel {
    pub id: Uuid,
    pub name: HeaplessString<100>,
    /// References RepresentativeModel.id
    pub representative_ids: Vec<Uuid>,
}

impl Identifiable for StudentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl StudentModel {
    pub fn is_linked_to(&self, representative_id: Uuid) -> bool {
        self.representative_ids.contains(&representative_id)
    }
}
