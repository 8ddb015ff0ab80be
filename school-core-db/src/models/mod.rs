pub mod identifiable;
pub mod enrollment;
pub mod representative;
pub mod student;

// Re-exports
pub use identifiable::*;
pub use enrollment::*;
pub use representative::*;
pub use student::*;
