//! Shared application state passed to the router builders.

use domain_users::{InMemoryUserRepository, UserService};

use crate::config::Config;

/// Cloned into every router that needs it. The user service wraps its
/// repository in an `Arc`, so clones share one directory.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: Config,
    pub users: UserService<InMemoryUserRepository>,
}

impl AppState {
    /// State with an empty in-memory directory
    pub fn new(config: Config) -> Self {
        Self {
            config,
            users: UserService::new(InMemoryUserRepository::new()),
        }
    }
}
