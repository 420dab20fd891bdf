use serde::{Deserialize, Serialize};

/// Identifies whose state a handler is synchronizing.
///
/// Remote store strategies derive storage locations from the pair, so the
/// same ids must be supplied for every request of the same user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateContext {
    /// Identifier of the deployed application.
    pub application_id: String,
    /// Stable identifier of the current user.
    pub user_id: String,
}

impl StateContext {
    /// Creates a context for the given application and user.
    pub fn new(application_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            user_id: user_id.into(),
        }
    }
}
