pub mod repo_impl;
pub mod create_batch;
pub mod find_by_student_id;

pub use repo_impl::EnrollmentRepositoryImpl;
