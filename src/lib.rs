pub mod config;
pub mod coords;
pub mod device;
pub mod errors;
pub mod ocr;

/// One-time process bootstrap: tracing subscriber + `.env` load.
///
/// Call once at the top of a scenario binary before creating a device
/// session. Unit tests skip this.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();
}
