//! scamsweep binary: render the listing, visit each profile, write reports.

use anyhow::Result;
use clap::Parser;
use scamsweep::renderer::{ChromiumRenderer, Renderer};
use scamsweep::{CrawlConfig, Pipeline};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(
    name = "scamsweep",
    version,
    about = "Scrape a scam-report directory into JSON and CSV reports"
)]
struct Cli {
    /// Listing page to crawl.
    #[arg(long, value_name = "URL", default_value = "https://scamwave.com/scammers/")]
    url: String,

    /// Stop after this many listing rows.
    #[arg(long, value_name = "N", default_value_t = 200)]
    max_profiles: usize,

    /// Pause after each profile visit.
    #[arg(long, value_name = "MS", default_value_t = 1500)]
    delay_ms: u64,

    /// CSS selector for the listing table body.
    #[arg(long, value_name = "SELECTOR", default_value = "tbody#myTable")]
    table_selector: String,

    /// Override the browser user agent.
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    #[arg(long, value_name = "FILE", default_value = "scamwave_profiles.json")]
    json_out: PathBuf,

    #[arg(long, value_name = "FILE", default_value = "scamwave_profiles.csv")]
    csv_out: PathBuf,

    /// Append crawl milestones to this JSONL file.
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,

    #[arg(long, value_name = "MS", default_value_t = 30_000)]
    nav_timeout_ms: u64,

    #[arg(long, value_name = "MS", default_value_t = 20_000)]
    rows_timeout_ms: u64,

    #[arg(long, value_name = "MS", default_value_t = 15_000)]
    settle_timeout_ms: u64,
}

impl Cli {
    fn into_config(self) -> CrawlConfig {
        let mut config = CrawlConfig {
            start_url: self.url,
            max_profiles: self.max_profiles,
            delay_between_ms: self.delay_ms,
            nav_timeout_ms: self.nav_timeout_ms,
            rows_timeout_ms: self.rows_timeout_ms,
            settle_timeout_ms: self.settle_timeout_ms,
            table_selector: self.table_selector,
            json_path: self.json_out,
            csv_path: self.csv_out,
            events_path: self.events,
            ..CrawlConfig::default()
        };
        if let Some(ua) = self.user_agent {
            config.user_agent = ua;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scamsweep=info".parse().unwrap()),
        )
        .init();

    let config = Cli::parse().into_config();
    info!("starting scamsweep v{}", env!("CARGO_PKG_VERSION"));

    let renderer = Arc::new(ChromiumRenderer::launch(&config.user_agent).await?);
    let pipeline = Pipeline::new(Arc::clone(&renderer) as Arc<dyn Renderer>, config);

    // Shut the browser down whichever way the run went.
    let result = pipeline.run().await;
    renderer.shutdown().await.ok();

    let profiles = result?;
    info!("done: {} profiles", profiles.len());
    Ok(())
}
