//! Users Domain
//!
//! An in-memory user directory served over HTTP.
//!
//! Layers, outermost first:
//!
//! - [`handlers`]: axum routes for list, create, get, update and delete, plus
//!   their OpenAPI description
//! - [`service`]: turns absent records into [`UserError::NotFound`] and
//!   rejects updates that change nothing
//! - [`repository`]: id assignment and email uniqueness behind one lock
//! - [`models`]: [`User`], which cannot exist in an invalid state, and the
//!   request DTOs
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let app: axum::Router = axum::Router::new().nest("/users", handlers::router(service));
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use models::{CreateUser, UpdateUser, User, UserId};
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::UserService;
