//! Per-profile fetch: isolated tab, hard navigation timeout, soft settle.

use crate::config::CrawlConfig;
use crate::error::RenderResult;
use crate::renderer::Renderer;
use tracing::debug;

/// Fetch one profile page and return its rendered markup.
///
/// Every call opens a fresh context, so a failure here can never disturb the
/// listing page or the next fetch. The navigation timeout is a hard
/// per-profile failure; the settle wait is best effort and content is read
/// either way once it elapses. One attempt per profile, no retry.
pub async fn fetch_profile(
    renderer: &dyn Renderer,
    url: &str,
    config: &CrawlConfig,
) -> RenderResult<String> {
    let mut context = renderer.new_context().await?;

    let fetched = async {
        context.navigate(url, config.nav_timeout_ms).await?;
        if !context.wait_network_settled(config.settle_timeout_ms).await {
            debug!("network never settled for {url}, reading content anyway");
        }
        context.content().await
    }
    .await;

    // The tab is released whichever way the fetch went.
    context.close().await.ok();
    fetched
}
