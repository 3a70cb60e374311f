//! `gop-inspect`: prints the stored progress of a profile as JSON.

use gop_content::application::library::ContentLibrary;
use gop_content::application::source::FileContentSource;
use gop_core::rng::SystemRng;
use gop_sections::config::RuntimeConfig;
use gop_sections::error::AppError;
use gop_sections::presenter::{LogPresenter, Presenter, ViewUpdate};
use gop_sections::{inspect, telemetry};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    #[serde(flatten)]
    report: inspect::InspectReport,
    status_message: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = RuntimeConfig::from_env()?;
    telemetry::init(config.log_format)?;

    tracing::info!(
        data_dir = %config.data_dir.display(),
        content_dir = %config.content_dir.display(),
        "inspecting stored progress"
    );

    let mut store = inspect::open_progress_store(&config.data_dir);
    let report = inspect::inspect(&mut store);
    LogPresenter.render(ViewUpdate::DebugSnapshot {
        progress: report.progress.clone(),
    });

    let content = ContentLibrary::load(&FileContentSource::new(&config.content_dir)).await;
    let status_message = content.status_message(&mut SystemRng::from_entropy());

    let output = Output {
        report,
        status_message,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
