//! Opt-in `tracing` setup for hosts embedding `climate-chart`.
//!
//! Events by target:
//! - `climate_chart::core::dataset`: rows dropped while parsing, at `debug`.
//! - `climate_chart::interaction::zoom`: window installs and rejections at
//!   `debug`, drag steps and cancelled drags at `trace`.
//! - `climate_chart::api`: series loads at `debug`, toggles and zoom resets
//!   at `trace`, rejected configs at `warn`.
//!
//! The crate never installs a subscriber itself.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "climate_chart=info";

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`, falling back
/// to [`DEFAULT_FILTER`].
///
/// Returns `false` without the `telemetry` feature or when the host already
/// set a global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Like [`init_default_tracing`] with a caller-chosen fallback directive,
/// e.g. `"climate_chart::interaction=trace"` while debugging zoom gestures.
#[must_use]
pub fn init_tracing_with_fallback(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn without_the_feature_nothing_is_installed() {
        assert!(!init_default_tracing());
        assert!(!init_tracing_with_fallback("climate_chart=trace"));
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_install_reports_an_existing_subscriber() {
        let _ = init_default_tracing();
        assert!(!init_tracing_with_fallback("climate_chart=trace"));
    }
}
