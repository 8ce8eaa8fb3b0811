//! Server infrastructure module.
//!
//! This module provides:
//! - Router assembly with OpenAPI documentation and shared layers
//! - Health response shape
//! - Graceful shutdown on SIGINT/SIGTERM
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(api_routes, &config.cors_allowed_origins)?;
//! create_app(router, &config).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_router};
pub use health::HealthResponse;
pub use shutdown::shutdown_signal;
