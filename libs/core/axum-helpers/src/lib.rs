//! # Axum Helpers
//!
//! HTTP plumbing shared by the services in this workspace, kept free of any
//! domain types.
//!
//! - [`server`]: wraps an API router with docs, fallbacks and layers, then
//!   serves it until SIGINT/SIGTERM
//! - [`errors`]: the one JSON error body every non-2xx response uses
//! - [`extractors`]: numeric id paths and validated JSON bodies that reject
//!   with that body
//!
//! ```ignore
//! let router = axum_helpers::create_router::<ApiDoc>(routes, &config.cors_allowed_origins)?;
//! axum_helpers::create_app(router, &config).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod server;

// Re-export server types
pub use server::{HealthResponse, create_app, create_router, shutdown_signal};

// Re-export error types
pub use errors::{ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{IdPath, ValidatedJson};
