pub mod repository;
pub mod service;
pub mod store;
pub mod store_repositories;
pub mod utils;

pub use service::{RepositoryCommitter, RepositoryDeletionOracle, RepositorySearch};
pub use store::{Executor, InMemoryStore, StoreError, Tables, UnitOfWork};
pub use store_repositories::{SchoolRepositories, StoreRepositories, StoreSession};

#[cfg(test)]
pub mod test_helper;
