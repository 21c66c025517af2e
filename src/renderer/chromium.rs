//! Chromium-backed renderer speaking the DevTools protocol.

use crate::error::{RenderError, RenderResult};
use crate::renderer::{RenderContext, Renderer};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::{
    EventLifecycleEvent, SetLifecycleEventsEnabledParams,
};
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

/// Environment variable that pins the browser executable.
pub const CHROMIUM_PATH_ENV: &str = "SCAMSWEEP_CHROMIUM_PATH";

/// Environment variable that disables the Chromium sandbox (containers).
pub const NO_SANDBOX_ENV: &str = "SCAMSWEEP_NO_SANDBOX";

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renderer backed by a single headless Chromium process, launched once per
/// run. Every context is a fresh tab in that process.
pub struct ChromiumRenderer {
    browser: Mutex<Browser>,
    handler_task: Mutex<Option<JoinHandle<()>>>,
}

impl ChromiumRenderer {
    /// Launch headless Chromium carrying `user_agent` on all requests.
    pub async fn launch(user_agent: &str) -> RenderResult<Self> {
        let mut builder = BrowserConfig::builder().arg(format!("--user-agent={user_agent}"));
        if std::env::var_os(NO_SANDBOX_ENV).is_some() {
            builder = builder.no_sandbox();
        }
        if let Some(path) = find_chromium() {
            debug!("using chromium at {}", path.display());
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow!("invalid browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("launching chromium (is chromium or google-chrome installed?)")?;

        // Drain protocol events until the browser goes away.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self {
            browser: Mutex::new(browser),
            handler_task: Mutex::new(Some(handler_task)),
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> RenderResult<Box<dyn RenderContext>> {
        let browser = self.browser.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .context("opening browser tab")?;
        Ok(Box::new(ChromiumContext {
            page,
            last_url: String::new(),
        }))
    }

    async fn shutdown(&self) -> RenderResult<()> {
        if let Some(task) = self.handler_task.lock().await.take() {
            let mut browser = self.browser.lock().await;
            browser.close().await.context("closing browser")?;
            let _ = browser.wait().await;
            task.abort();
        }
        Ok(())
    }
}

/// One Chromium tab.
struct ChromiumContext {
    page: Page,
    last_url: String,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> RenderResult<()> {
        let nav = async {
            self.page.goto(url).await.context("requesting navigation")?;
            self.page
                .wait_for_navigation()
                .await
                .context("waiting for page load")?;
            Ok::<_, anyhow::Error>(())
        };
        match tokio::time::timeout(Duration::from_millis(timeout_ms), nav).await {
            Ok(result) => {
                result?;
                self.last_url = url.to_string();
                Ok(())
            }
            Err(_) => Err(RenderError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms,
            }),
        }
    }

    async fn wait_for_selector(&mut self, selector: &str, timeout_ms: u64) -> RenderResult<bool> {
        let quoted = serde_json::Value::String(selector.to_string()).to_string();
        let probe = format!("document.querySelector({quoted}) !== null");
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            let found: bool = self
                .page
                .evaluate(probe.as_str())
                .await
                .context("probing selector")?
                .into_value()
                .unwrap_or(false);
            if found {
                return Ok(true);
            }
            if tokio::time::Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn wait_network_settled(&mut self, timeout_ms: u64) -> bool {
        let mut lifecycle = match self.page.event_listener::<EventLifecycleEvent>().await {
            Ok(stream) => stream,
            Err(e) => {
                debug!("lifecycle listener unavailable: {e}");
                return false;
            }
        };
        // Lifecycle events are opt-in on the CDP side. Enabling after the
        // listener is attached replays the states already reached.
        if let Err(e) = self
            .page
            .execute(SetLifecycleEventsEnabledParams { enabled: true })
            .await
        {
            debug!("lifecycle events unavailable: {e}");
            return false;
        }
        tokio::time::timeout(Duration::from_millis(timeout_ms), async {
            while let Some(event) = lifecycle.next().await {
                if event.name == "networkIdle" || event.name == "networkAlmostIdle" {
                    return true;
                }
            }
            false
        })
        .await
        .unwrap_or(false)
    }

    async fn content(&mut self) -> RenderResult<String> {
        let html = self.page.content().await.context("reading page content")?;
        Ok(html)
    }

    async fn current_url(&mut self) -> RenderResult<String> {
        let url = self.page.url().await.context("reading page url")?;
        Ok(url.unwrap_or_else(|| self.last_url.clone()))
    }

    async fn close(self: Box<Self>) -> RenderResult<()> {
        let ChromiumContext { page, .. } = *self;
        page.close().await.context("closing tab")?;
        Ok(())
    }
}

/// Locate a Chromium binary: env override first, then the usual PATH names.
fn find_chromium() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(CHROMIUM_PATH_ENV) {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }
    for name in ["google-chrome", "chromium", "chromium-browser", "chrome"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }
    None
}
