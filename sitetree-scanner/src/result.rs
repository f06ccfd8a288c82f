use crate::graph::PageRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters gathered over one crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub non_html_skipped: usize,
    pub invalid_references: usize,
}

/// Live counterpart of [`CrawlStats`], shared by crawl tasks.
#[derive(Debug, Default)]
pub(crate) struct CrawlCounters {
    pub pages_fetched: AtomicUsize,
    pub fetch_failures: AtomicUsize,
    pub non_html_skipped: AtomicUsize,
    pub invalid_references: AtomicUsize,
}

impl CrawlCounters {
    pub fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlStats {
        CrawlStats {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            non_html_skipped: self.non_html_skipped.load(Ordering::Relaxed),
            invalid_references: self.invalid_references.load(Ordering::Relaxed),
        }
    }
}

/// The finished, immutable output of a crawl: the page graph keyed by
/// canonical page URL, rooted at the canonical seed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMap {
    pub root: String,
    pub pages: BTreeMap<String, PageRecord>,
    pub stats: CrawlStats,
}

impl SiteMap {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            pages: BTreeMap::new(),
            stats: CrawlStats::default(),
        }
    }

    pub fn page(&self, url: &str) -> Option<&PageRecord> {
        self.pages.get(url)
    }

    /// Canonical URLs of every page linked from `url`, in discovery order.
    pub fn children(&self, url: &str) -> Vec<&str> {
        self.page(url)
            .map(|record| record.links.iter().map(|l| l.url.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn assets(&self, url: &str) -> &[String] {
        self.page(url)
            .map(|record| record.assets.as_slice())
            .unwrap_or_default()
    }

    pub fn link_count(&self) -> usize {
        self.pages.values().map(|r| r.links.len()).sum()
    }

    pub fn asset_count(&self) -> usize {
        self.pages.values().map(|r| r.assets.len()).sum()
    }
}
