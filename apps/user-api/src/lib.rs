//! User directory HTTP service.
//!
//! `main` loads [`config::Config`], builds [`state::AppState`] and serves
//! [`app`]. Tests build the same router without binding a socket.

pub mod api;
pub mod config;
pub mod openapi;
pub mod state;

use axum::Router;
use state::AppState;

/// Full application router: API routes plus docs, fallbacks and layers.
///
/// # Errors
/// Fails if a configured CORS origin is not a valid header value.
pub fn app(state: &AppState) -> std::io::Result<Router> {
    let api_routes = api::routes(state);
    axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        &state.config.server.cors_allowed_origins,
    )
}
