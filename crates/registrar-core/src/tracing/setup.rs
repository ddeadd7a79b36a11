//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: &str =
    "registrar_storage=info,registrar_ledger=info,registrar_certificates=info,registrar_stats=info";

/// Install the global subscriber. Reads `REGISTRAR_LOG` for per-crate log levels, e.g.
/// `REGISTRAR_LOG=registrar_storage=debug,registrar_certificates=info`.
/// Unset or unparsable values fall back to `info` for the registrar crates.
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .try_init();
    });
}
