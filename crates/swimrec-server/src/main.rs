//! Swimrec Server - Main entry point

use anyhow::Result;
use swimrec_common::logging::{init_logging, LogConfig};
use tracing::info;

use swimrec_server::{api, config::Config};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("swimrec-server")
        .filter_directives("swimrec_server=debug,tower_http=debug,sqlx=info")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    info!("Starting swimrec server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    api::serve(config).await?;

    Ok(())
}
