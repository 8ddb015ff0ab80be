use crate::store::Executor;

pub struct StudentRepositoryImpl {
    pub executor: Executor,
}

impl StudentRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
