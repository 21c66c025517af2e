//! Typed errors for the rendering seam.
//!
//! One enum covers both severities the run distinguishes: a `RenderError`
//! from the listing navigation is fatal and bubbles up through `anyhow`,
//! while the same error from a profile fetch is logged and absorbed so the
//! run continues with the next row.

use thiserror::Error;

/// Failure surfaced by the rendering seam.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The navigation step did not complete inside its hard timeout.
    #[error("navigation to {url} timed out after {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    /// Anything else the engine reported: launch, tab, or protocol trouble.
    #[error(transparent)]
    Engine(#[from] anyhow::Error),
}

impl RenderError {
    /// True for the hard navigation timeout, false for everything else.
    pub fn is_navigation_timeout(&self) -> bool {
        matches!(self, RenderError::NavigationTimeout { .. })
    }
}

/// Result alias for renderer operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
