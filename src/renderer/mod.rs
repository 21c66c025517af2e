//! Rendering seam: the narrow set of browser capabilities the crawl needs.
//!
//! The sequencing, timeout, and error-isolation logic in `crawl` is the hard
//! part of this crate. It talks to the browser only through these traits, so
//! tests drive it with a scripted fake while production runs Chromium.

pub mod chromium;

use crate::error::RenderResult;
use async_trait::async_trait;

pub use chromium::ChromiumRenderer;

/// A rendering engine that hands out isolated page contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a fresh page context. Contexts never share navigation state.
    async fn new_context(&self) -> RenderResult<Box<dyn RenderContext>>;

    /// Tear the engine down. Called once per run, on every exit path.
    async fn shutdown(&self) -> RenderResult<()>;
}

/// One isolated page context, consumed by a single linear flow.
#[async_trait]
pub trait RenderContext: Send {
    /// Navigate and wait for the load to commit, up to `timeout_ms`.
    /// Exceeding the window is `RenderError::NavigationTimeout`.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> RenderResult<()>;

    /// Wait up to `timeout_ms` for `selector` to match an element.
    /// Returns whether it appeared; an elapsed window is not an error.
    async fn wait_for_selector(&mut self, selector: &str, timeout_ms: u64) -> RenderResult<bool>;

    /// Wait up to `timeout_ms` for network traffic to go idle. Best effort:
    /// returns whether the page settled and never fails.
    async fn wait_network_settled(&mut self, timeout_ms: u64) -> bool;

    /// Serialized markup of the current document.
    async fn content(&mut self) -> RenderResult<String>;

    /// The page's current URL, after any redirects.
    async fn current_url(&mut self) -> RenderResult<String>;

    /// Release the context.
    async fn close(self: Box<Self>) -> RenderResult<()>;
}
