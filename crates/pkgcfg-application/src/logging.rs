//! Tracing subscriber bootstrap for hosts that do not install their own.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the pkgcfg log filter directive.
pub const LOG_ENV: &str = "PKGCFG_LOG";

const DEFAULT_FILTER: &str = "info";

/// Installs a global fmt subscriber.
///
/// The filter comes from `PKGCFG_LOG`, then `RUST_LOG`, then `info`.
/// Returns `false` when a global subscriber was already set, in which case
/// nothing changes.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(filter))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_a_noop() {
        init_tracing();
        assert!(!init_tracing());
    }
}
