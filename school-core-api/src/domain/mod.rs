pub mod attachment;
pub mod commit;
pub mod form;
pub mod ids;
pub mod representative;
pub mod safety;

pub use attachment::*;
pub use commit::*;
pub use form::*;
pub use ids::*;
pub use representative::*;
pub use safety::*;
