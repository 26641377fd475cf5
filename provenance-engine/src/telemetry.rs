use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::Environment;

/// Installs the global fmt subscriber, `RUST_LOG` overrides the default `info` filter.
/// Calling it more than once is a no-op.
pub fn init_tracing(service_name: &str, environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let ansi = matches!(environment, Environment::Local | Environment::Test);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(ansi)
        .try_init()
        .is_ok();

    if installed {
        info!(service_name, %environment, "tracing initialized");
    }
}
