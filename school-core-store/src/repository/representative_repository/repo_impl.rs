use crate::store::Executor;

pub struct RepresentativeRepositoryImpl {
    pub executor: Executor,
}

impl RepresentativeRepositoryImpl {
    pub fn new(executor: Executor) -> Self {
        Self { executor }
    }
}
