pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod replace_links;

pub use repo_impl::StudentRepositoryImpl;
