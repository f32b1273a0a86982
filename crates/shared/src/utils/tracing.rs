use std::sync::Once;

use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

/// Default directives used when `RUST_LOG` isn't set
const DEFAULT_FILTER: &str = "info";

pub fn configure_tracing() -> Result<(), SetGlobalDefaultError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_line_number(true)
            .with_file(true)
            .with_span_events(FmtSpan::CLOSE)
            .finish(),
    )
}

/// Configures tracing inside a Once block so multiple calls (e.g. one per
/// test) don't fail
pub fn configure_tracing_once() {
    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        // Another subscriber may already be installed, that's fine
        let _ = configure_tracing();
    });
}
