use tracing_subscriber::{EnvFilter, prelude::*};

pub const SENTRY_ENDPOINT: &str = "SENTRY_ENDPOINT";

fn default_filter() -> EnvFilter {
    EnvFilter::new("info,sqlx=warn,sea_orm=warn,hyper=warn,rustls=warn")
}

/// Install the global subscriber: `fmt` output filtered by `RUST_LOG`, plus
/// Sentry when `SENTRY_ENDPOINT` is set. Keep the returned guard alive for
/// the lifetime of the process.
pub fn init() -> Option<sentry::ClientInitGuard> {
    let sentry_endpoint = std::env::var(SENTRY_ENDPOINT).unwrap_or_default();
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    let guard = if sentry_endpoint.is_empty() {
        None
    } else {
        Some(sentry::init((
            sentry_endpoint,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                traces_sample_rate: 0.3,
                ..Default::default()
            },
        )))
    };

    let sentry_layer = guard.as_ref().map(|_| sentry_tracing::layer());
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(env_filter))
        .with(sentry_layer)
        .try_init();

    if let Err(err) = result {
        tracing::warn!("Tracing subscriber already installed: {}", err);
    }

    guard
}
