//! Text sanitization and contact-indicator extraction.

pub mod indicators;
pub mod sanitize;

pub use indicators::{extract_indicators, ContactIndicators};
pub use sanitize::visible_text;
