use std::sync::Arc;

use airboard_app::app::api::routes;
use airboard_app::expander_handler::ExpanderHandler;
use airboard_calendar::{ExpansionOptions, RecurrenceExpander};
use airboard_core::config::{LoggingConfig, load_config};
use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Installs the subscriber at debug until the configured level is known.
fn init_tracing() -> FilterHandle {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true).with_file(true).with_line_number(true))
        .init();

    filter_handle
}

fn apply_log_level(handle: &FilterHandle, logging: &LoggingConfig) {
    match EnvFilter::try_new(&logging.level) {
        Ok(filter) => {
            if let Err(e) = handle.modify(|current| *current = filter) {
                tracing::warn!(error = %e, "Failed to apply configured log level");
            }
        }
        Err(e) => tracing::warn!(level = %logging.level, error = %e, "Ignoring invalid log level"),
    }
}

/// Router with the shared expander injected ahead of every route.
fn service(expander: RecurrenceExpander) -> Router {
    let options = expander.options();
    tracing::info!(
        max_occurrences = options.max_occurrences,
        safety_horizon_years = options.safety_horizon_years,
        default_timezone = %options.default_timezone,
        "Recurrence expander ready"
    );

    Router::new()
        .hoop(ExpanderHandler {
            expander: Arc::new(expander),
        })
        .push(routes())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter_handle = init_tracing();

    let config = load_config()?;
    apply_log_level(&filter_handle, &config.logging);
    tracing::debug!(config = ?config, "Configuration loaded");

    let expander = RecurrenceExpander::new(ExpansionOptions::from_config(&config.calendar)?);
    let router = service(expander);

    let bind_addr = config.server.bind_addr();
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;
    tracing::info!(origin = %config.server.origin(), "Airboard calendar listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
