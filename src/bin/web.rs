use pv_dashboard::app;
use pv_dashboard::config::DashboardConfig;
use std::env;

/// Main entry point for the dashboard web server
///
/// # Arguments
/// * `[data_dir] [bind_addr]` - optional positional overrides of the configuration
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let config = DashboardConfig::load(&args)?;
    log::info!(
        "Serving workbooks from {} on {}",
        config.data_dir.display(),
        config.bind_addr
    );

    app::run(config).await
}
