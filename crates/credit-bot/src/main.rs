//! Social credit bot entry point
//!
//! Run with:
//! ```bash
//! cargo run -p credit-bot
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use credit_common::{try_init_tracing, try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Run the bot
    if let Err(e) = run().await {
        error!(error = %e, "Bot failed");
        eprintln!("credit-bot: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(e) = try_init_tracing() {
                eprintln!("Warning: Failed to initialize tracing: {e}");
            }
            error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::from_settings(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        app = %config.app.name,
        env = ?config.app.env,
        data_dir = %config.ledger.data_dir.display(),
        "Configuration loaded"
    );

    // Run the bot until Ctrl-C
    credit_bot::run(config).await?;

    Ok(())
}
