use std::process::ExitCode;

use ai_llm_service::telemetry;
use tracing::{Level, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is fine; real env vars still apply.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer())
        .with(telemetry::app_layer())
        .init();

    if let Err(err) = dotenv {
        info!("no .env loaded: {err}");
    }

    match api::start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "faq-chatbot failed to start");
            ExitCode::FAILURE
        }
    }
}
