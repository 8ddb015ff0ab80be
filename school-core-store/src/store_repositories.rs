use std::sync::Arc;

use crate::repository::{
    EnrollmentRepositoryImpl, RepresentativeRepositoryImpl, StudentRepositoryImpl,
};
use crate::store::{Executor, InMemoryStore, StoreError, UnitOfWork};

/// Builds repositories over an [`InMemoryStore`].
#[derive(Clone)]
pub struct StoreRepositories {
    store: InMemoryStore,
}

impl StoreRepositories {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Create all repositories sharing a single unit of work
    pub async fn begin(&self) -> StoreSession {
        let unit_of_work = self.store.begin().await;
        let repositories = SchoolRepositories::new(unit_of_work.executor());
        StoreSession {
            unit_of_work,
            repositories,
        }
    }

    /// Repositories over a copy of the committed state; writes through them are never published
    pub fn read_only(&self) -> SchoolRepositories {
        SchoolRepositories::new(&self.store.read_only())
    }
}

pub struct SchoolRepositories {
    pub representative_repository: Arc<RepresentativeRepositoryImpl>,
    pub student_repository: Arc<StudentRepositoryImpl>,
    pub enrollment_repository: Arc<EnrollmentRepositoryImpl>,
}

impl SchoolRepositories {
    fn new(executor: &Executor) -> Self {
        Self {
            representative_repository: Arc::new(RepresentativeRepositoryImpl::new(executor.clone())),
            student_repository: Arc::new(StudentRepositoryImpl::new(executor.clone())),
            enrollment_repository: Arc::new(EnrollmentRepositoryImpl::new(executor.clone())),
        }
    }
}

/// Repositories bound to one open unit of work.
///
/// Dropping the session without calling [`StoreSession::commit`] discards
/// every change made through it.
pub struct StoreSession {
    unit_of_work: UnitOfWork,
    repositories: SchoolRepositories,
}

impl StoreSession {
    pub fn repos(&self) -> &SchoolRepositories {
        &self.repositories
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        self.unit_of_work.commit().await
    }

    pub async fn rollback(self) {
        self.unit_of_work.rollback().await
    }
}
