//! Run configuration with documented defaults.
//!
//! Everything the pipeline needs is carried here explicitly so a run can be
//! constructed in tests with injected fixtures instead of reading globals.

use std::path::PathBuf;

/// Configuration for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Listing page to crawl. Default: the scamwave scammer index.
    pub start_url: String,
    /// User-agent identifying this crawler to the target server.
    pub user_agent: String,
    /// Hard cap on profiles; rows beyond it are never visited. Default 200.
    pub max_profiles: usize,
    /// Polite delay between consecutive profile visits. Default 1500 ms.
    pub delay_between_ms: u64,
    /// Hard navigation timeout for both the listing and profile pages.
    /// Default 30000 ms.
    pub nav_timeout_ms: u64,
    /// How long to wait for the first data row to appear. Default 20000 ms.
    pub rows_timeout_ms: u64,
    /// Extra buffer after rows appear, letting late rows land. Default 1000 ms.
    pub rows_buffer_ms: u64,
    /// Soft wait for network traffic to settle on profile pages; content is
    /// read either way once it elapses. Default 15000 ms.
    pub settle_timeout_ms: u64,
    /// CSS selector of the dynamically populated table body.
    pub table_selector: String,
    /// Truncation bound for each profile's sanitized text. Default 20000.
    pub max_details_len: usize,
    /// Where the structured output lands.
    pub json_path: PathBuf,
    /// Where the tabular output lands.
    pub csv_path: PathBuf,
    /// Optional JSONL event log; `None` disables it.
    pub events_path: Option<PathBuf>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            start_url: "https://scamwave.com/scammers/".to_string(),
            user_agent: format!("scamsweep/{} (research crawler)", env!("CARGO_PKG_VERSION")),
            max_profiles: 200,
            delay_between_ms: 1500,
            nav_timeout_ms: 30_000,
            rows_timeout_ms: 20_000,
            rows_buffer_ms: 1000,
            settle_timeout_ms: 15_000,
            table_selector: "tbody#myTable".to_string(),
            max_details_len: 20_000,
            json_path: PathBuf::from("scamwave_profiles.json"),
            csv_path: PathBuf::from("scamwave_profiles.csv"),
            events_path: None,
        }
    }
}

impl CrawlConfig {
    /// Selector that matches a populated data row inside the table body.
    pub fn row_wait_selector(&self) -> String {
        format!("{} tr", self.table_selector)
    }
}
