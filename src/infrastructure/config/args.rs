use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "ideaboard",
    version,
    about = "A terminal client for browsing paginated idea feeds",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Content API origin.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Asset host whose images are routed through the fallback chain.
    #[arg(long, value_name = "HOST")]
    pub asset_domain: Option<String>,

    /// Proxy base substituted for the asset-domain origin.
    #[arg(long, value_name = "URL")]
    pub image_proxy: Option<String>,

    /// Initial query string, e.g. "page=2&size=20&sort=published_at".
    /// Overrides the stored location state.
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Disable image previews.
    #[arg(long)]
    pub no_images: bool,
}
