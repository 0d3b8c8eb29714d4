mod bootstrap;
mod report;

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use insight_core::settings::Settings;
use insight_core::time_utils;
use insight_data::analysis::analyze_handle;
use insight_data::client::{ClientConfig, CodeforcesClient};
use insight_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("cf-insight v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("Handle: {}, View: {}", settings.handle, settings.view);

    let timezone = settings.resolve_timezone();
    let twelve_hour = time_utils::use_twelve_hour(&settings.time_format);

    let client = CodeforcesClient::new(ClientConfig {
        timeout: Duration::from_secs(settings.timeout_secs),
        ..ClientConfig::default()
    })?;

    let result = analyze_handle(&client, &settings.handle).await?;

    match settings.view.as_str() {
        "summary" => {
            report::print_summary(&result, settings.top_tags as usize)?;
        }

        "dashboard" => {
            tracing::info!("Opening dashboard (press 'q' to quit)...");
            let app = App::new(
                &settings.theme,
                &timezone,
                twelve_hour,
                settings.top_tags as usize,
            );
            app.run(&result).await?;
        }

        unknown => {
            eprintln!("Unknown view mode: {}", unknown);
        }
    }

    Ok(())
}
