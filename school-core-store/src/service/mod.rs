pub mod committer;
pub mod oracle;
pub mod search;

pub use committer::RepositoryCommitter;
pub use oracle::RepositoryDeletionOracle;
pub use search::RepositorySearch;
