//! Tracing bootstrap for hosts embedding `rowchart`.
//!
//! The crate only emits `tracing` events; installing a subscriber is the
//! host's choice. `init_default_tracing` offers a reasonable default for
//! quick starts and examples, gated behind the `telemetry` feature so
//! library consumers pay nothing for it.

/// Installs a compact stdout subscriber filtered by `RUST_LOG`, defaulting
/// to `rowchart=info`.
///
/// Returns `true` on success, `false` when the feature is disabled or a
/// global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rowchart=info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
