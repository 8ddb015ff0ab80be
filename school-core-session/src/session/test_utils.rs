use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;

use school_core_api::{
    ApiError, ApiResult, AttachmentSet, CommitPlan, CommitReceipt, DeletionSafetyOracle,
    DeletionSafetyReport, Nationality, NewRepresentative, PersistedRepresentative,
    RepresentativeCommitter, RepresentativeField, RepresentativeId, RepresentativeProfile,
    RepresentativeSearch, Sex, StudentId,
};

use super::RepresentativeSession;

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

pub fn create_test_persisted(name: &str, national_id: &str) -> PersistedRepresentative {
    PersistedRepresentative {
        id: RepresentativeId::new(),
        profile: create_test_profile(name, national_id),
        student_ids: Vec::new(),
        active: true,
    }
}

pub fn create_test_new(name: &str) -> NewRepresentative {
    NewRepresentative {
        profile: create_test_profile(name, "22333444"),
    }
}

/// Fill every field of the open form with valid values.
pub fn fill_valid_form(session: &mut RepresentativeSession, name: &str) {
    for (field, value) in [
        (RepresentativeField::Name, name),
        (RepresentativeField::NationalId, "22333444"),
        (RepresentativeField::Nationality, "V"),
        (RepresentativeField::BirthDate, "20-05-1984"),
        (RepresentativeField::Sex, "female"),
        (RepresentativeField::Email, "representative@example.com"),
        (RepresentativeField::Phone, "04141234567"),
        (RepresentativeField::EmergencyPhone, "04241234567"),
        (RepresentativeField::Street, "Calle 5, Casa 12"),
        (RepresentativeField::LivesWithStudent, "Si"),
        (RepresentativeField::HasActiveJob, "No"),
    ] {
        session.update_field(field, value).unwrap();
    }
}

/// Oracle answering every check with the same scripted result
pub struct ScriptedOracle {
    response: ApiResult<DeletionSafetyReport>,
    requests: Mutex<Vec<(RepresentativeId, StudentId)>>,
}

impl ScriptedOracle {
    pub fn new(response: ApiResult<DeletionSafetyReport>) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<(RepresentativeId, StudentId)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl DeletionSafetyOracle for ScriptedOracle {
    async fn can_delete_representative(
        &self,
        representative: &PersistedRepresentative,
        student_id: StudentId,
    ) -> ApiResult<DeletionSafetyReport> {
        self.requests.lock().push((representative.id, student_id));
        self.response.clone()
    }
}

pub struct CountingSearch {
    response: ApiResult<Vec<PersistedRepresentative>>,
    queries: Mutex<Vec<String>>,
}

impl CountingSearch {
    pub fn new(response: ApiResult<Vec<PersistedRepresentative>>) -> Self {
        Self {
            response,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl RepresentativeSearch for CountingSearch {
    async fn search_representatives(&self, query: &str) -> ApiResult<Vec<PersistedRepresentative>> {
        self.queries.lock().push(query.to_string());
        self.response.clone()
    }
}

/// Committer that records every plan and stores drafts under fresh ids
#[derive(Default)]
pub struct RecordingCommitter {
    fail: bool,
    plans: Mutex<Vec<CommitPlan>>,
}

impl RecordingCommitter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            plans: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.plans.lock().len()
    }

    pub fn last_plan(&self) -> Option<CommitPlan> {
        self.plans.lock().last().cloned()
    }
}

#[async_trait]
impl RepresentativeCommitter for RecordingCommitter {
    async fn commit_representatives(&self, plan: &CommitPlan) -> ApiResult<CommitReceipt> {
        self.plans.lock().push(plan.clone());
        if self.fail {
            return Err(ApiError::NetworkError("connection reset".to_string()));
        }

        let created: Vec<PersistedRepresentative> = plan
            .create
            .iter()
            .map(|new| PersistedRepresentative {
                id: RepresentativeId::new(),
                profile: new.profile.clone(),
                student_ids: plan.student_id.into_iter().collect(),
                active: true,
            })
            .collect();
        let linked = plan
            .keep
            .iter()
            .copied()
            .chain(plan.update.iter().map(|rep| rep.id))
            .chain(created.iter().map(|rep| rep.id))
            .collect();

        Ok(CommitReceipt {
            linked,
            created,
            unlinked: plan.unlink.len(),
            deleted: plan.delete.len(),
        })
    }
}
