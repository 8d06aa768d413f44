//! Opt-in tracing setup for hosts embedding `stackgrid`.
//!
//! The engine emits `debug!`/`trace!` events for brush, zoom, axis and render
//! transitions regardless of this module. Hosts that already own a subscriber
//! should ignore it.

/// Default directive used when `RUST_LOG` is absent.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "info";

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// [`DEFAULT_TRACING_DIRECTIVE`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_directive(DEFAULT_TRACING_DIRECTIVE)
}

/// Installs a compact subscriber filtered by `RUST_LOG`, falling back to
/// `fallback_directive` (for example `"stackgrid=debug"`).
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_tracing_with_directive(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
