use chrono::NaiveDate;
use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use school_core_api::domain::{
    Attachment, AttachmentKind, AttachmentSet, Nationality, PersistedRepresentative,
    RepresentativeId, RepresentativeProfile, Sex, StudentId,
};

use crate::models::identifiable::Identifiable;
use crate::utils::{to_heapless, to_optional_heapless};

/// Stored binary attachment (encoded blob plus filename)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobModel {
    pub data: String,
    pub filename: HeaplessString<255>,
}

/// # Documentation
/// Storage model for a representative (parent or guardian)
///
/// A representative may be linked to several students; the link set is kept
/// on both sides (`student_ids` here, `representative_ids` on the student).
/// Free-text widths are four bytes per character of the validated maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepresentativeModel {
    pub id: Uuid,

    pub name: HeaplessString<400>,

    pub national_id: HeaplessString<20>,

    #[serde(
        serialize_with = "serialize_nationality",
        deserialize_with = "deserialize_nationality"
    )]
    pub nationality: Nationality,

    pub birth_date: NaiveDate,

    #[serde(serialize_with = "serialize_sex", deserialize_with = "deserialize_sex")]
    pub sex: Sex,

    pub email: HeaplessString<400>,
    pub phone: HeaplessString<20>,
    pub residence_phone: Option<HeaplessString<20>>,
    pub emergency_phone: HeaplessString<20>,
    pub street: Option<HeaplessString<1020>>,

    pub lives_with_student: bool,
    pub has_active_job: bool,
    pub job_place: Option<HeaplessString<400>>,
    pub job_title: Option<HeaplessString<400>>,

    pub photo: Option<BlobModel>,
    pub identity_document: Option<BlobModel>,
    pub signature: Option<BlobModel>,

    /// References StudentModel.id
    pub student_ids: Vec<Uuid>,

    pub active: bool,
}

impl Identifiable for RepresentativeModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}

impl RepresentativeModel {
    /// Build a storage model from validated attributes.
    ///
    /// Fails when a value exceeds its bounded column; values are never truncated.
    pub fn from_profile(
        id: Uuid,
        profile: &RepresentativeProfile,
        student_ids: Vec<Uuid>,
        active: bool,
    ) -> Result<Self, String> {
        Ok(RepresentativeModel {
            id,
            name: to_heapless(&profile.name, "name")?,
            national_id: to_heapless(&profile.national_id, "national_id")?,
            nationality: profile.nationality,
            birth_date: profile.birth_date,
            sex: profile.sex,
            email: to_heapless(&profile.email, "email")?,
            phone: to_heapless(&profile.phone, "phone")?,
            residence_phone: to_optional_heapless(
                profile.residence_phone.as_deref(),
                "residence_phone",
            )?,
            emergency_phone: to_heapless(&profile.emergency_phone, "emergency_phone")?,
            street: to_optional_heapless(profile.street.as_deref(), "street")?,
            lives_with_student: profile.lives_with_student,
            has_active_job: profile.has_active_job,
            job_place: to_optional_heapless(profile.job_place.as_deref(), "job_place")?,
            job_title: to_optional_heapless(profile.job_title.as_deref(), "job_title")?,
            photo: blob_from(&profile.attachments, AttachmentKind::Photo)?,
            identity_document: blob_from(&profile.attachments, AttachmentKind::IdentityDocument)?,
            signature: blob_from(&profile.attachments, AttachmentKind::Signature)?,
            student_ids,
            active,
        })
    }

    pub fn from_persisted(representative: &PersistedRepresentative) -> Result<Self, String> {
        Self::from_profile(
            representative.id.0,
            &representative.profile,
            representative.student_ids.iter().map(|id| id.0).collect(),
            representative.active,
        )
    }

    pub fn to_profile(&self) -> RepresentativeProfile {
        let mut attachments = AttachmentSet::default();
        for (kind, blob) in [
            (AttachmentKind::Photo, &self.photo),
            (AttachmentKind::IdentityDocument, &self.identity_document),
            (AttachmentKind::Signature, &self.signature),
        ] {
            if let Some(blob) = blob {
                attachments.set(kind, Attachment::new(blob.data.clone(), blob.filename.as_str()));
            }
        }

        RepresentativeProfile {
            name: self.name.to_string(),
            national_id: self.national_id.to_string(),
            nationality: self.nationality,
            birth_date: self.birth_date,
            sex: self.sex,
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            residence_phone: self.residence_phone.as_ref().map(|v| v.to_string()),
            emergency_phone: self.emergency_phone.to_string(),
            street: self.street.as_ref().map(|v| v.to_string()),
            lives_with_student: self.lives_with_student,
            has_active_job: self.has_active_job,
            job_place: self.job_place.as_ref().map(|v| v.to_string()),
            job_title: self.job_title.as_ref().map(|v| v.to_string()),
            attachments,
        }
    }

    pub fn to_persisted(&self) -> PersistedRepresentative {
        PersistedRepresentative {
            id: RepresentativeId(self.id),
            profile: self.to_profile(),
            student_ids: self.student_ids.iter().copied().map(StudentId).collect(),
            active: self.active,
        }
    }
}

fn blob_from(attachments: &AttachmentSet, kind: AttachmentKind) -> Result<Option<BlobModel>, String> {
    attachments
        .get(kind)
        .map(|attachment| {
            Ok(BlobModel {
                data: attachment.data.clone(),
                filename: to_heapless(&attachment.filename, "filename")?,
            })
        })
        .transpose()
}

// Serialization functions for Nationality
pub fn serialize_nationality<S>(value: &Nationality, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.code())
}

pub fn deserialize_nationality<'de, D>(deserializer: D) -> Result<Nationality, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    value_str
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("Invalid Nationality: {value_str}")))
}

// Serialization functions for Sex
pub fn serialize_sex<S>(value: &Sex, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(value.as_str())
}

pub fn deserialize_sex<'de, D>(deserializer: D) -> Result<Sex, D::Error>
where
    D: Deserializer<'de>,
{
    let value_str = String::deserialize(deserializer)?;
    value_str
        .parse()
        .map_err(|_| serde::de::Error::custom(format!("Invalid Sex: {value_str}")))
}
