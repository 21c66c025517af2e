//! Run orchestration: one listing walk, per-profile enrichment in strict row
//! order, then both output files.

use crate::config::CrawlConfig;
use crate::crawl::detail;
use crate::crawl::listing::{self, EntityStub};
use crate::events::{CrawlEvent, EventLog};
use crate::extract::{extract_indicators, visible_text, ContactIndicators};
use crate::output;
use crate::renderer::Renderer;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// One scraped profile, the unit of output. Field order here is the field
/// order in the structured output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: Option<String>,
    pub status: Option<String>,
    pub profile_url: Option<String>,
    /// Sanitized page text, present only when the detail fetch succeeded.
    pub details_text: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub crypto_addrs: Vec<String>,
}

impl Profile {
    fn from_stub(stub: &EntityStub) -> Self {
        Self {
            name: stub.name.clone(),
            status: stub.status.clone(),
            profile_url: stub.detail_url.clone(),
            ..Self::default()
        }
    }

    fn apply_indicators(&mut self, indicators: ContactIndicators) {
        self.emails = indicators.emails;
        self.phones = indicators.phones;
        self.crypto_addrs = indicators.crypto_addrs;
    }
}

/// Drives a full crawl run end to end.
pub struct Pipeline {
    renderer: Arc<dyn Renderer>,
    config: CrawlConfig,
}

impl Pipeline {
    pub fn new(renderer: Arc<dyn Renderer>, config: CrawlConfig) -> Self {
        Self { renderer, config }
    }

    /// Crawl, extract, and write both output files.
    ///
    /// Returns the ordered profiles. Only the list page itself can fail the
    /// run; when it does, no output file is written. Once the listing is in
    /// hand both files are always produced, empty ones included.
    pub async fn run(&self) -> Result<Vec<Profile>> {
        let mut events = EventLog::open(self.config.events_path.as_deref());
        events.record(CrawlEvent::run_started(&self.config.start_url));

        let stubs = self.collect_stubs(&mut events).await?;
        let profiles = self.enrich(stubs, &mut events).await;

        output::write_json(&profiles, &self.config.json_path)
            .with_context(|| format!("writing {}", self.config.json_path.display()))?;
        output::write_csv(&profiles, &self.config.csv_path)
            .with_context(|| format!("writing {}", self.config.csv_path.display()))?;
        info!(
            "wrote {} profiles to {} and {}",
            profiles.len(),
            self.config.json_path.display(),
            self.config.csv_path.display()
        );
        events.record(CrawlEvent::outputs_written(profiles.len()));

        Ok(profiles)
    }

    /// Walk the listing page inside its own context.
    async fn collect_stubs(&self, events: &mut EventLog) -> Result<Vec<EntityStub>> {
        let mut context = self
            .renderer
            .new_context()
            .await
            .context("opening listing context")?;
        let walked = listing::collect_stubs(context.as_mut(), &self.config).await;
        context.close().await.ok();

        let stubs = walked?;
        events.record(CrawlEvent::rows_found(stubs.len()));
        Ok(stubs)
    }

    /// Visit each stub up to the cap, in listing order.
    async fn enrich(&self, stubs: Vec<EntityStub>, events: &mut EventLog) -> Vec<Profile> {
        let cap = self.config.max_profiles;
        let mut profiles = Vec::new();

        for (idx, stub) in stubs.into_iter().take(cap).enumerate() {
            let mut profile = Profile::from_stub(&stub);

            if let Some(url) = profile.profile_url.clone() {
                info!("visiting profile {}: {url}", idx + 1);
                match detail::fetch_profile(self.renderer.as_ref(), &url, &self.config).await {
                    Ok(markup) => {
                        // Indicators come from the full page text; only the
                        // stored text is bounded.
                        let text = visible_text(&markup);
                        profile.apply_indicators(extract_indicators(&text));
                        profile.details_text =
                            Some(truncate_chars(&text, self.config.max_details_len));
                        events.record(CrawlEvent::profile_visited(&url));
                    }
                    Err(err) => {
                        if err.is_navigation_timeout() {
                            warn!("timeout visiting profile {url}");
                        } else {
                            warn!("error scraping profile {url}: {err}");
                        }
                        events.record(CrawlEvent::profile_failed(&url, err.to_string()));
                    }
                }
                // Polite delay after every attempt, success or not.
                tokio::time::sleep(Duration::from_millis(self.config.delay_between_ms)).await;
            } else {
                // No detail page; mine the row markup itself.
                let text = visible_text(&stub.row_html);
                profile.apply_indicators(extract_indicators(&text));
            }

            profiles.push(profile);
        }

        info!(
            "collected {} profiles (max_profiles={})",
            profiles.len(),
            cap
        );
        profiles
    }
}

/// Truncate to at most `max` characters, on a character boundary.
fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
