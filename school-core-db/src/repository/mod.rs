pub mod exist_by_ids;
pub mod find_by_student_id;
pub mod load_batch;
pub mod create_batch;
pub mod update_batch;
pub mod delete_batch;
pub mod replace_links;
pub mod search_by_text;

// Re-exports
pub use exist_by_ids::*;
pub use find_by_student_id::*;
pub use load_batch::*;
pub use create_batch::*;
pub use update_batch::*;
pub use delete_batch::*;
pub use replace_links::*;
pub use search_by_text::*;
