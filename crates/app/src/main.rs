//! Gaze Cursor - Main Entry Point

use anyhow::Context;
use app::{init_logging, run, AppConfig, DEFAULT_CONFIG_PATH};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = AppConfig::load(&path)
        .with_context(|| format!("failed to load configuration from {}", path))?;
    init_logging(&config.log)?;

    info!("=== Gaze Cursor v{} ===", env!("CARGO_PKG_VERSION"));
    info!(
        "Source: {:?}, screen {}x{}",
        config.source.kind, config.tracker.screen.width, config.tracker.screen.height
    );

    match run(&config).await {
        Ok(summary) => {
            info!(
                "Session ended: {} frames, {} failed, {} clicks, {} calibration samples",
                summary.frames_processed,
                summary.frames_failed,
                summary.clicks,
                summary.calibration_samples
            );
            Ok(())
        }
        Err(e) => {
            error!("Gaze cursor stopped: {}", e);
            Err(e.into())
        }
    }
}
