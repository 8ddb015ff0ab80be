use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::attachment::AttachmentSet;
use super::form::{RepresentativeField, RepresentativeForm};
use super::ids::{RepresentativeId, StudentId};
use crate::validation::{format_birth_date, yes_no_label};

/// Nationality selector: national (`V`) or foreign (`E`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nationality {
    National,
    Foreign,
}

impl Nationality {
    pub fn code(&self) -> &'static str {
        match self {
            Nationality::National => "V",
            Nationality::Foreign => "E",
        }
    }
}

impl fmt::Display for Nationality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Nationality {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "V" => Ok(Nationality::National),
            "E" => Ok(Nationality::Foreign),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(()),
        }
    }
}

/// Validated attributes of a representative, shared by drafted and stored records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeProfile {
    pub name: String,
    pub national_id: String,
    pub nationality: Nationality,
    pub birth_date: NaiveDate,
    pub sex: Sex,
    pub email: String,
    /// Digits only
    pub phone: String,
    pub residence_phone: Option<String>,
    pub emergency_phone: String,
    pub street: Option<String>,
    pub lives_with_student: bool,
    pub has_active_job: bool,
    pub job_place: Option<String>,
    pub job_title: Option<String>,
    pub attachments: AttachmentSet,
}

impl RepresentativeProfile {
    /// Rehydrate an edit form from this profile, birth date in display format.
    pub fn to_form(&self) -> RepresentativeForm {
        let mut form = RepresentativeForm::default();
        form.set(RepresentativeField::Name, &self.name);
        form.set(RepresentativeField::NationalId, &self.national_id);
        form.set(RepresentativeField::Nationality, self.nationality.code());
        form.set(RepresentativeField::BirthDate, format_birth_date(self.birth_date));
        form.set(RepresentativeField::Sex, self.sex.as_str());
        form.set(RepresentativeField::Email, &self.email);
        form.set(RepresentativeField::Phone, &self.phone);
        if let Some(residence_phone) = &self.residence_phone {
            form.set(RepresentativeField::ResidencePhone, residence_phone);
        }
        form.set(RepresentativeField::EmergencyPhone, &self.emergency_phone);
        if let Some(street) = &self.street {
            form.set(RepresentativeField::Street, street);
        }
        form.set(
            RepresentativeField::LivesWithStudent,
            yes_no_label(self.lives_with_student),
        );
        form.set(RepresentativeField::HasActiveJob, yes_no_label(self.has_active_job));
        if let Some(job_place) = &self.job_place {
            form.set(RepresentativeField::JobPlace, job_place);
        }
        if let Some(job_title) = &self.job_title {
            form.set(RepresentativeField::JobTitle, job_title);
        }
        form
    }
}

/// Capability shared by drafted and stored representatives.
pub trait RepresentativeRecord {
    fn profile(&self) -> &RepresentativeProfile;

    /// Identifier of the stored record, `None` for drafts never persisted
    fn representative_id(&self) -> Option<RepresentativeId>;

    fn display_name(&self) -> &str {
        &self.profile().name
    }
}

/// A representative drafted during the current session, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRepresentative {
    pub profile: RepresentativeProfile,
}

/// A representative that already exists in the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRepresentative {
    pub id: RepresentativeId,
    pub profile: RepresentativeProfile,
    /// Every student this representative is linked to, as last reported by the backend
    pub student_ids: Vec<StudentId>,
    /// Inactive records are archived and cannot be edited from a student form
    pub active: bool,
}

impl RepresentativeRecord for NewRepresentative {
    fn profile(&self) -> &RepresentativeProfile {
        &self.profile
    }

    fn representative_id(&self) -> Option<RepresentativeId> {
        None
    }
}

impl RepresentativeRecord for PersistedRepresentative {
    fn profile(&self) -> &RepresentativeProfile {
        &self.profile
    }

    fn representative_id(&self) -> Option<RepresentativeId> {
        Some(self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Representative {
    New(NewRepresentative),
    Persisted(PersistedRepresentative),
}

impl Representative {
    pub fn id(&self) -> Option<RepresentativeId> {
        self.representative_id()
    }

    pub fn as_persisted(&self) -> Option<&PersistedRepresentative> {
        match self {
            Representative::Persisted(persisted) => Some(persisted),
            Representative::New(_) => None,
        }
    }

    pub fn is_read_only(&self) -> bool {
        match self {
            Representative::New(_) => false,
            Representative::Persisted(persisted) => !persisted.active,
        }
    }

    /// Same record identity with the attributes replaced.
    pub fn with_profile(self, profile: RepresentativeProfile) -> Self {
        match self {
            Representative::New(_) => Representative::New(NewRepresentative { profile }),
            Representative::Persisted(persisted) => {
                Representative::Persisted(PersistedRepresentative { profile, ..persisted })
            }
        }
    }
}

impl RepresentativeRecord for Representative {
    fn profile(&self) -> &RepresentativeProfile {
        match self {
            Representative::New(new) => new.profile(),
            Representative::Persisted(persisted) => persisted.profile(),
        }
    }

    fn representative_id(&self) -> Option<RepresentativeId> {
        match self {
            Representative::New(new) => new.representative_id(),
            Representative::Persisted(persisted) => persisted.representative_id(),
        }
    }
}

impl From<NewRepresentative> for Representative {
    fn from(value: NewRepresentative) -> Self {
        Representative::New(value)
    }
}

impl From<PersistedRepresentative> for Representative {
    fn from(value: PersistedRepresentative) -> Self {
        Representative::Persisted(value)
    }
}
