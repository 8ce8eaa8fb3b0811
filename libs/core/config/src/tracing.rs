use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, Layer, Registry, prelude::*};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

const PRODUCTION_FILTER: &str = "info";
const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug";

/// Install the color-eyre report hook used by every binary in the workspace.
///
/// Reports show the error location but not the environment section. A second
/// install is ignored, so tests and `main` can both call it.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Install the global subscriber for `environment`.
///
/// Production writes one flattened JSON object per event without targets.
/// Development pretty-prints with targets. `RUST_LOG`, when set, replaces the
/// default filter. A `tracing_error::ErrorLayer` is always present so eyre
/// reports carry span traces.
///
/// Only the first call installs anything; later calls log at debug and return.
pub fn init_tracing(environment: &Environment) {
    let default_filter = if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let installed = tracing_subscriber::registry()
        .with(output_layer(environment))
        .with(tracing_error::ErrorLayer::default())
        .with(filter)
        .try_init();

    match installed {
        Ok(()) => info!(?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized, skipping re-initialization"),
    }
}

fn output_layer(environment: &Environment) -> BoxedLayer {
    if environment.is_production() {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .boxed()
    }
}
