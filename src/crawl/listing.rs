//! Listing-page walk: wait for the dynamic table, parse rows into stubs.

use crate::config::CrawlConfig;
use crate::renderer::RenderContext;
use anyhow::{Context, Result};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

/// Minimal record for one listing row, before detail enrichment.
#[derive(Debug, Clone, Default)]
pub struct EntityStub {
    pub name: Option<String>,
    pub status: Option<String>,
    /// Absolute profile URL. Absent when the row carries no link; the row
    /// markup is then the only source of contact data.
    pub detail_url: Option<String>,
    /// Raw markup of the row, kept for inline extraction.
    pub row_html: String,
}

/// Load the listing page and parse its table into stubs, in row order.
///
/// A navigation failure here is fatal: without the list there is nothing to
/// crawl. Rows never appearing is not fatal; that returns an empty sequence.
pub async fn collect_stubs(
    context: &mut dyn RenderContext,
    config: &CrawlConfig,
) -> Result<Vec<EntityStub>> {
    info!("navigating to list page {}", config.start_url);
    context
        .navigate(&config.start_url, config.nav_timeout_ms)
        .await
        .context("loading list page")?;

    let appeared = context
        .wait_for_selector(&config.row_wait_selector(), config.rows_timeout_ms)
        .await
        .context("waiting for listing rows")?;
    if !appeared {
        warn!(
            "no listing rows appeared within {}ms",
            config.rows_timeout_ms
        );
        return Ok(Vec::new());
    }

    // Late rows keep landing for a moment after the first one.
    tokio::time::sleep(Duration::from_millis(config.rows_buffer_ms)).await;

    let html = context.content().await.context("reading list page")?;
    let base_url = context
        .current_url()
        .await
        .unwrap_or_else(|_| config.start_url.clone());

    let stubs = parse_rows(&html, &base_url, &config.table_selector);
    info!("found {} listing rows", stubs.len());
    Ok(stubs)
}

/// Parse the table body into stubs. An absent table body or an unparseable
/// selector degrades to an empty sequence, never an error.
pub fn parse_rows(html: &str, base_url: &str, table_selector: &str) -> Vec<EntityStub> {
    let document = Html::parse_document(html);
    let Ok(table_sel) = Selector::parse(table_selector) else {
        warn!("table selector {table_selector:?} does not parse");
        return Vec::new();
    };
    let Some(tbody) = document.select(&table_sel).next() else {
        warn!("table body {table_selector:?} not present after rendering");
        return Vec::new();
    };
    let Ok(row_sel) = Selector::parse("tr") else {
        return Vec::new();
    };

    tbody
        .select(&row_sel)
        .filter_map(|row| parse_row(row, base_url))
        .collect()
}

/// Parse one row. `None` when the row has no cells at all.
fn parse_row(row: ElementRef<'_>, base_url: &str) -> Option<EntityStub> {
    let cell_sel = Selector::parse("td, th").ok()?;
    let link_sel = Selector::parse("a[href]").ok()?;

    let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
    if cells.is_empty() {
        return None;
    }

    let name = cells.first().map(cell_text);
    let status = cells.get(1).map(cell_text);
    let detail_url = cells
        .first()
        .and_then(|cell| cell.select(&link_sel).next())
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .and_then(|href| resolve_detail_url(base_url, href));

    Some(EntityStub {
        name,
        status,
        detail_url,
        row_html: row.html(),
    })
}

/// Concatenated text of a cell with each chunk trimmed.
fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .collect()
}

/// Resolve a row link against the list page's own URL, then collapse
/// duplicate slashes in the path. Scheme and query separators stay intact.
fn resolve_detail_url(base_url: &str, href: &str) -> Option<String> {
    let resolved = match Url::parse(href) {
        Ok(url) => url,
        Err(_) => Url::parse(base_url).ok()?.join(href).ok()?,
    };
    Some(collapse_path_slashes(resolved))
}

fn collapse_path_slashes(mut url: Url) -> String {
    if url.path().contains("//") {
        let collapsed = collapse_slash_runs(url.path());
        url.set_path(&collapsed);
    }
    url.to_string()
}

fn collapse_slash_runs(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for ch in path.chars() {
        if ch == '/' && out.ends_with('/') {
            continue;
        }
        out.push(ch);
    }
    out
}
