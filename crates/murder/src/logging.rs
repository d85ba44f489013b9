//! Subscriber setup for binaries embedding the controller.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "info";

/// Installs a global `tracing` subscriber.
///
/// Levels come from `RUST_LOG` (e.g. `RUST_LOG=murder_game=trace` to see
/// every event a game receives), falling back to [`DEFAULT_FILTER`].
/// Call once, before creating games.
///
/// # Example
///
/// ```no_run
/// #[tokio::main]
/// async fn main() {
///     murder::logging::init();
///     tracing::info!("server starting");
/// }
/// ```
pub fn init() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("logging initialized");
}
