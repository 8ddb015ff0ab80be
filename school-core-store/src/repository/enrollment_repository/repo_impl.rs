use crate::store::Executor;

pub struct EnrollmentRepositoryImpl {
    pub executor: Executor,
}

impl EnrollmentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
