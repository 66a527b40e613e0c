pub mod content;
pub mod document;
pub mod locale;
pub mod preferences;
pub mod schema_org;
pub mod server;
pub mod settings;
pub mod utils;

use crate::settings::Settings;
use crate::utils::logger::LoggerBuilder;
use tracing::{info, warn};

pub async fn run() -> anyhow::Result<()> {
    let (settings, warnings) = Settings::resolve_env();
    if let Err(e) = LoggerBuilder::default()
        .log_dir(settings.log_dir())
        .default_level(settings.mode.default_log_level())
        .init()
    {
        eprintln!("Warning: failed to initialize file logging: {:#}", e);
    }
    info!("Log initialized in {}", settings.log_dir().display());
    settings.report(&warnings);

    if !settings.data_dir().is_dir() {
        warn!(
            "Data directory {} does not exist; data endpoints will answer 503",
            settings.data_dir().display()
        );
    }
    server::serve(settings).await
}
