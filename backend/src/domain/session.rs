//! Explicit application session state.

/// Identifies the logged-in account whose collections the services operate
/// on. Passed into every storage-backed service at construction instead of
/// living in an ambient global, so tests and multi-account callers can run
/// side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}
