use std::error::Error;

use school_core_api::ApiError;

/// Map a repository failure onto the collaborator error surface.
pub fn to_api_error(err: Box<dyn Error + Send + Sync>) -> ApiError {
    ApiError::DatabaseError(err.to_string())
}
