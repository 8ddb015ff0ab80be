pub mod committer;
pub mod oracle;
pub mod search;

pub use committer::*;
pub use oracle::*;
pub use search::*;
