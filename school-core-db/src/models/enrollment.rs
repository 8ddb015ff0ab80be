use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::models::identifiable::Identifiable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnrollmentState {
    Draft,
    Done,
    Cancelled,
}

impl EnrollmentState {
    /// Only confirmed enrollments pin their responsible representative
    pub fn is_active(&self) -> bool {
        matches!(self, EnrollmentState::Done)
    }
}

impl fmt::Display for EnrollmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentState::Draft => write!(f, "Draft"),
            EnrollmentState::Done => write!(f, "Done"),
            EnrollmentState::Cancelled => write!(f, "Cancelled"),
        }
    }
}

impl FromStr for EnrollmentState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Draft" => Ok(EnrollmentState::Draft),
            "Done" => Ok(EnrollmentState::Done),
            "Cancelled" => Ok(EnrollmentState::Cancelled),
            _ => Err(()),
        }
    }
}

/// # Documentation
/// Storage model for an enrollment (a student's registration in a school year)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentModel {
    pub id: Uuid,

    /// References StudentModel.id
    pub student_id: Uuid,

    /// References RepresentativeModel.id
    /// The representative answering for the student on this enrollment
    pub responsible_representative_id: Option<Uuid>,

    pub name: HeaplessString<100>,

    #[serde(
        serialize_with = "serialize_enrollment_state",
        deserialize_with = "deserialize_enrollment_state"
    )]
    pub state: EnrollmentState,
}

impl Identifiable for EnrollmentModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl EnrollmentModel {
    /// True when this enrollment is active and names `representative_id` as responsible.
    pub fn pins(&self, representative_id: Uuid) -> bool {
        self.state.is_active() && self.responsible_representative_id == Some(representative_id)
    }
}

pub fn serialize_enrollment_state<S>(value: &EnrollmentState, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_string())
}

pub fn deserialize_enrollment_state<'de, D>(deserializer: D) -> Result<EnrollmentState, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    value_str
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("Invalid EnrollmentState: {value_str}")))
}
