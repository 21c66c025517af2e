//! Research crawler for scam-listing sites.
//!
//! Renders the dynamically populated listing table in a headless browser,
//! visits each profile page in turn, and mines the visible text for contact
//! indicators: emails, phone numbers, and crypto-style addresses. One run
//! produces a JSON array and a flattened CSV of the same profiles.

pub mod config;
pub mod crawl;
pub mod error;
pub mod events;
pub mod extract;
pub mod output;
pub mod renderer;

pub use config::CrawlConfig;
pub use crawl::pipeline::{Pipeline, Profile};
