//! Telemetry helpers for structured logging and tracing.

/// Initialize tracing/telemetry. Loads `.env` first so `RUST_LOG` can come
/// from a dotfile; users can install their own subscriber, in which case this
/// helper is a no-op.
pub fn init_tracing() {
    let _ = dotenvy::dotenv();
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
