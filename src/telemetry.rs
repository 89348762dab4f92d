//! Tracing setup helpers for hosts embedding `annot-rs`.
//!
//! Instrumentation stays opt-in: the library emits `tracing` events on state
//! transitions, and hosts either call `init_default_tracing` or install
//! their own subscriber and filters.

/// Installs a default `tracing` subscriber when the `telemetry` feature is on.
///
/// Returns `true` on success, `false` when the feature is disabled or a
/// global subscriber is already installed by the host.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
