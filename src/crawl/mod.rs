//! The crawl itself: listing walk, per-profile fetches, run orchestration.

pub mod detail;
pub mod listing;
pub mod pipeline;
