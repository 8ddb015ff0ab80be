use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::attachment::AttachmentSet;
use super::representative::{Nationality, RepresentativeProfile, Sex};
use crate::validation::{self, normalize_phone, parse_birth_date, parse_yes_no};

/// Editable attributes of a representative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepresentativeField {
    Name,
    NationalId,
    Nationality,
    BirthDate,
    Sex,
    Email,
    Phone,
    ResidencePhone,
    EmergencyPhone,
    Street,
    LivesWithStudent,
    HasActiveJob,
    JobPlace,
    JobTitle,
}

impl RepresentativeField {
    pub const ALL: [RepresentativeField; 14] = [
        RepresentativeField::Name,
        RepresentativeField::NationalId,
        RepresentativeField::Nationality,
        RepresentativeField::BirthDate,
        RepresentativeField::Sex,
        RepresentativeField::Email,
        RepresentativeField::Phone,
        RepresentativeField::ResidencePhone,
        RepresentativeField::EmergencyPhone,
        RepresentativeField::Street,
        RepresentativeField::LivesWithStudent,
        RepresentativeField::HasActiveJob,
        RepresentativeField::JobPlace,
        RepresentativeField::JobTitle,
    ];

    pub const REQUIRED: [RepresentativeField; 10] = [
        RepresentativeField::Name,
        RepresentativeField::NationalId,
        RepresentativeField::Nationality,
        RepresentativeField::BirthDate,
        RepresentativeField::Sex,
        RepresentativeField::Email,
        RepresentativeField::Phone,
        RepresentativeField::EmergencyPhone,
        RepresentativeField::LivesWithStudent,
        RepresentativeField::HasActiveJob,
    ];

    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepresentativeField::Name => "name",
            RepresentativeField::NationalId => "national_id",
            RepresentativeField::Nationality => "nationality",
            RepresentativeField::BirthDate => "birth_date",
            RepresentativeField::Sex => "sex",
            RepresentativeField::Email => "email",
            RepresentativeField::Phone => "phone",
            RepresentativeField::ResidencePhone => "residence_phone",
            RepresentativeField::EmergencyPhone => "emergency_phone",
            RepresentativeField::Street => "street",
            RepresentativeField::LivesWithStudent => "lives_with_student",
            RepresentativeField::HasActiveJob => "has_active_job",
            RepresentativeField::JobPlace => "job_place",
            RepresentativeField::JobTitle => "job_title",
        }
    }

    /// Human-readable label used in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            RepresentativeField::Name => "Full name",
            RepresentativeField::NationalId => "National id",
            RepresentativeField::Nationality => "Nationality",
            RepresentativeField::BirthDate => "Birth date",
            RepresentativeField::Sex => "Sex",
            RepresentativeField::Email => "Email",
            RepresentativeField::Phone => "Phone",
            RepresentativeField::ResidencePhone => "Residence phone",
            RepresentativeField::EmergencyPhone => "Emergency phone",
            RepresentativeField::Street => "Street",
            RepresentativeField::LivesWithStudent => "Lives with student",
            RepresentativeField::HasActiveJob => "Has active job",
            RepresentativeField::JobPlace => "Job place",
            RepresentativeField::JobTitle => "Job title",
        }
    }
}

impl fmt::Display for RepresentativeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RepresentativeField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RepresentativeField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

/// Validation messages keyed by field; empty when the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<RepresentativeField, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: RepresentativeField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: RepresentativeField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: RepresentativeField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RepresentativeField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (RepresentativeField, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Record the outcome of validating one field: set on error, cleared on success.
    pub fn record(&mut self, field: RepresentativeField, outcome: Option<String>) {
        match outcome {
            Some(message) => self.insert(field, message),
            None => self.remove(field),
        }
    }
}

/// Raw text values of a representative being created or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeForm {
    values: BTreeMap<RepresentativeField, String>,
}

impl RepresentativeForm {
    pub fn set(&mut self, field: RepresentativeField, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Raw value as typed, empty string when never set
    pub fn get(&self, field: RepresentativeField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Validate every field at once, collecting all failures.
    pub fn validate_all(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        for field in RepresentativeField::ALL {
            if let Some(message) = validation::validate(field, self.get(field)) {
                errors.insert(field, message);
            }
        }
        errors
    }

    /// Convert the form into a typed profile carrying `attachments`.
    ///
    /// Fails with every field error when any field is invalid.
    pub fn to_profile(&self, attachments: &AttachmentSet) -> Result<RepresentativeProfile, FieldErrors> {
        let errors = self.validate_all();
        if !errors.is_empty() {
            return Err(errors);
        }

        let mut errors = FieldErrors::default();
        let nationality = self.parsed(RepresentativeField::Nationality, &mut errors, |v| {
            v.parse::<Nationality>().ok()
        });
        let birth_date = self.parsed(RepresentativeField::BirthDate, &mut errors, parse_birth_date);
        let sex = self.parsed(RepresentativeField::Sex, &mut errors, |v| v.parse::<Sex>().ok());
        let phone = self.parsed(RepresentativeField::Phone, &mut errors, normalize_phone);
        let emergency_phone =
            self.parsed(RepresentativeField::EmergencyPhone, &mut errors, normalize_phone);
        let lives_with_student =
            self.parsed(RepresentativeField::LivesWithStudent, &mut errors, parse_yes_no);
        let has_active_job = self.parsed(RepresentativeField::HasActiveJob, &mut errors, parse_yes_no);

        let (
            Some(nationality),
            Some(birth_date),
            Some(sex),
            Some(phone),
            Some(emergency_phone),
            Some(lives_with_student),
            Some(has_active_job),
        ) = (
            nationality,
            birth_date,
            sex,
            phone,
            emergency_phone,
            lives_with_student,
            has_active_job,
        )
        else {
            return Err(errors);
        };

        Ok(RepresentativeProfile {
            name: self.text(RepresentativeField::Name),
            national_id: self.text(RepresentativeField::NationalId),
            nationality,
            birth_date,
            sex,
            email: self.text(RepresentativeField::Email),
            phone,
            residence_phone: self
                .optional(RepresentativeField::ResidencePhone)
                .and_then(|value| normalize_phone(&value)),
            emergency_phone,
            street: self.optional(RepresentativeField::Street),
            lives_with_student,
            has_active_job,
            job_place: self.optional(RepresentativeField::JobPlace),
            job_title: self.optional(RepresentativeField::JobTitle),
            attachments: attachments.clone(),
        })
    }

    fn text(&self, field: RepresentativeField) -> String {
        self.get(field).trim().to_string()
    }

    fn optional(&self, field: RepresentativeField) -> Option<String> {
        let value = self.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn parsed<T>(
        &self,
        field: RepresentativeField,
        errors: &mut FieldErrors,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let parsed = parse(self.get(field).trim());
        if parsed.is_none() {
            errors.insert(field, format!("{} could not be read", field.label()));
        }
        parsed
    }
}
