//! Shared scripted renderer for pipeline tests.

use async_trait::async_trait;
use scamsweep::error::{RenderError, RenderResult};
use scamsweep::renderer::{RenderContext, Renderer};
use scamsweep::CrawlConfig;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const LIST_URL: &str = "https://scamwave.com/scammers/";

/// Scripted outcome for navigating to one URL.
#[derive(Debug, Clone)]
pub enum PageResult {
    Markup(String),
    Timeout,
    Error(String),
}

/// In-memory renderer that serves scripted pages and counts tab traffic.
pub struct FakeRenderer {
    pages: HashMap<String, PageResult>,
    rows_appear: bool,
    contexts_opened: AtomicUsize,
    contexts_closed: Arc<AtomicUsize>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            rows_appear: true,
            contexts_opened: AtomicUsize::new(0),
            contexts_closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_page(mut self, url: &str, markup: &str) -> Self {
        self.pages
            .insert(url.to_string(), PageResult::Markup(markup.to_string()));
        self
    }

    pub fn with_timeout(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), PageResult::Timeout);
        self
    }

    pub fn with_error(mut self, url: &str, message: &str) -> Self {
        self.pages
            .insert(url.to_string(), PageResult::Error(message.to_string()));
        self
    }

    /// Script the listing rows never showing up.
    pub fn without_rows(mut self) -> Self {
        self.rows_appear = false;
        self
    }

    pub fn opened(&self) -> usize {
        self.contexts_opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.contexts_closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for FakeRenderer {
    async fn new_context(&self) -> RenderResult<Box<dyn RenderContext>> {
        self.contexts_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeContext {
            pages: self.pages.clone(),
            rows_appear: self.rows_appear,
            current: None,
            closed: Arc::clone(&self.contexts_closed),
        }))
    }

    async fn shutdown(&self) -> RenderResult<()> {
        Ok(())
    }
}

struct FakeContext {
    pages: HashMap<String, PageResult>,
    rows_appear: bool,
    current: Option<(String, String)>,
    closed: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderContext for FakeContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> RenderResult<()> {
        match self.pages.get(url) {
            Some(PageResult::Markup(markup)) => {
                self.current = Some((url.to_string(), markup.clone()));
                Ok(())
            }
            Some(PageResult::Timeout) => Err(RenderError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms,
            }),
            Some(PageResult::Error(message)) => {
                Err(RenderError::Engine(anyhow::anyhow!("{message}")))
            }
            None => Err(RenderError::Engine(anyhow::anyhow!(
                "no page scripted for {url}"
            ))),
        }
    }

    async fn wait_for_selector(&mut self, _selector: &str, _timeout_ms: u64) -> RenderResult<bool> {
        Ok(self.rows_appear)
    }

    async fn wait_network_settled(&mut self, _timeout_ms: u64) -> bool {
        true
    }

    async fn content(&mut self) -> RenderResult<String> {
        self.current
            .as_ref()
            .map(|(_, markup)| markup.clone())
            .ok_or_else(|| RenderError::Engine(anyhow::anyhow!("no page loaded")))
    }

    async fn current_url(&mut self) -> RenderResult<String> {
        self.current
            .as_ref()
            .map(|(url, _)| url.clone())
            .ok_or_else(|| RenderError::Engine(anyhow::anyhow!("no page loaded")))
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Config pointed at a temp dir, with the polite delays zeroed out.
pub fn test_config(dir: &Path) -> CrawlConfig {
    CrawlConfig {
        start_url: LIST_URL.to_string(),
        delay_between_ms: 0,
        rows_buffer_ms: 0,
        json_path: dir.join("profiles.json"),
        csv_path: dir.join("profiles.csv"),
        ..CrawlConfig::default()
    }
}

pub fn listing_markup(rows: &str) -> String {
    format!(
        "<html><body><table><tbody id=\"myTable\">{rows}</tbody></table></body></html>"
    )
}

pub fn profile_markup(body: &str) -> String {
    format!("<html><head><script>var t = 1;</script></head><body>{body}</body></html>")
}
