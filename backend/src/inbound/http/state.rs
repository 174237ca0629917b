//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain pipeline and remain testable with any storage adapter.

use std::sync::Arc;

use crate::domain::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// The user request pipeline.
    pub users: Arc<UserService>,
}

impl HttpState {
    /// Construct state around a pipeline instance.
    pub fn new(users: Arc<UserService>) -> Self {
        Self { users }
    }
}
