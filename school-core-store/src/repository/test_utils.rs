use chrono::NaiveDate;
use heapless::String as HeaplessString;
use uuid::Uuid;

use school_core_api::domain::{
    AttachmentSet, Nationality, PersistedRepresentative, RepresentativeProfile, Sex,
};
use school_core_db::models::{EnrollmentModel, EnrollmentState, RepresentativeModel, StudentModel};

pub fn create_test_profile(name: &str, national_id: &str) -> RepresentativeProfile {
    RepresentativeProfile {
        name: name.to_string(),
        national_id: national_id.to_string(),
        nationality: Nationality::National,
        birth_date: NaiveDate::from_ymd_opt(1984, 5, 20).unwrap(),
        sex: Sex::Female,
        email: "representative@example.com".to_string(),
        phone: "04141234567".to_string(),
        residence_phone: None,
        emergency_phone: "04241234567".to_string(),
        street: Some("Calle 5, Casa 12".to_string()),
        lives_with_student: true,
        has_active_job: false,
        job_place: None,
        job_title: None,
        attachments: AttachmentSet::default(),
    }
}

pub fn create_test_representative(name: &str, national_id: &str) -> RepresentativeModel {
    RepresentativeModel::from_profile(
        Uuid::new_v4(),
        &create_test_profile(name, national_id),
        Vec::new(),
        true,
    )
    .unwrap()
}

pub fn create_test_persisted(model: &RepresentativeModel) -> PersistedRepresentative {
    model.to_persisted()
}

pub fn create_test_student(name: &str) -> StudentModel {
    StudentModel {
        id: Uuid::new_v4(),
        name: HeaplessString::try_from(name).unwrap(),
        representative_ids: Vec::new(),
    }
}

pub fn create_test_enrollment(
    student_id: Uuid,
    responsible_representative_id: Option<Uuid>,
    state: EnrollmentState,
) -> EnrollmentModel {
    EnrollmentModel {
        id: Uuid::new_v4(),
        student_id,
        responsible_representative_id,
        name: HeaplessString::try_from("2025-2026").unwrap(),
        state,
    }
}
