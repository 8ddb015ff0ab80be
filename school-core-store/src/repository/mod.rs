pub mod enrollment_repository;
pub mod representative_repository;
pub mod student_repository;
#[cfg(test)]
pub mod test_utils;

pub use enrollment_repository::EnrollmentRepositoryImpl;
pub use representative_repository::RepresentativeRepositoryImpl;
pub use student_repository::StudentRepositoryImpl;
