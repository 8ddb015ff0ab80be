pub mod deletion_queue;
pub mod draft_list;
pub mod edit_buffer;
pub mod removal;
pub mod search;
pub mod session;

pub use deletion_queue::DeferredDeletionQueue;
pub use draft_list::{DraftEntry, DraftList, EntryKey};
pub use edit_buffer::{EditBuffer, EditTarget};
pub use removal::{
    OracleOutcome, OracleRequest, RemovalChoice, RemovalOutcome, RemovalPrompt,
    RemovalResolution, RemovalStart, RemovalState, RemovalTicket,
};
pub use search::{SearchApplied, SearchRequest, SearchState};
pub use session::{RepresentativeSession, SessionMode, StudentScope};
