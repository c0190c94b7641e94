use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use ideaboard::domain::ports::LocationPort;
use ideaboard::infrastructure::{
    load_config, AppConfig, CliArgs, HttpImageFetcher, IdeasApiClient, MemoryLocation,
    StateFileLocation,
};
use ideaboard::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn create_app() -> Result<App> {
    let args = CliArgs::parse();
    let mut config = load_config(args.config.as_deref());
    config.merge_with_args(args);

    init_logging(&config)?;

    info!(version = ideaboard::VERSION, "Starting Ideaboard");

    let feed = Arc::new(IdeasApiClient::with_base_url(&config.base_url)?);
    let fetcher = Arc::new(HttpImageFetcher::new()?);
    let location: Arc<dyn LocationPort> = match StateFileLocation::default_location() {
        Some(location) => Arc::new(location),
        None => Arc::new(MemoryLocation::default()),
    };

    Ok(App::new(config, feed, fetcher, location))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
