use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use sitetree_scanner::crawler::{DEFAULT_CONCURRENCY, DEFAULT_MAX_DEPTH};
use sitetree_scanner::{Crawler, ProgressCallback, SiteMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub max_depth: usize,
    pub concurrency: usize,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

impl CrawlOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            show_progress_bars: false,
        }
    }
}

/// Extract the path component from a URL, `/` for the site root
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl over HTTP with the given options
pub async fn execute_crawl(options: CrawlOptions) -> Result<SiteMap> {
    let crawler = Crawler::with_timeout(options.timeout_secs)
        .context("Failed to create HTTP client")?;
    execute_crawl_with(crawler, options).await
}

/// Execute a crawl with a preconfigured crawler; depth and concurrency from
/// `options` override the crawler's own.
pub async fn execute_crawl_with(crawler: Crawler, options: CrawlOptions) -> Result<SiteMap> {
    let CrawlOptions {
        url,
        max_depth,
        concurrency,
        show_progress_bars,
        ..
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .context("Invalid progress template")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let fetch_count = Arc::new(AtomicUsize::new(0));
    let progress_callback: ProgressCallback = {
        let pb = progress_bar.clone();
        let fetch_count = fetch_count.clone();
        Arc::new(move |depth: usize, page: String| {
            let count = fetch_count.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(url = %page, remaining_depth = depth, "fetching page");
            if let Some(ref pb) = pb {
                pb.set_message(format!(
                    "Crawling... {} pages, now {}",
                    count,
                    extract_url_path(&page)
                ));
            }
        })
    };

    let result = crawler
        .with_max_depth(max_depth)
        .with_concurrency(concurrency)
        .with_progress_callback(progress_callback)
        .crawl(&url)
        .await
        .with_context(|| format!("Failed to crawl {}", url));

    if let Some(ref pb) = progress_bar {
        let total = fetch_count.load(Ordering::Relaxed);
        pb.finish_and_clear();
        debug!(fetch_attempts = total, "crawl finished");
    }

    result
}
