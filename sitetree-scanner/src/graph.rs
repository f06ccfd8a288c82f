use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;

/// A link from a page to an in-domain child page.
///
/// `raw` is the attribute value exactly as written in the markup, `url` is the
/// canonical form used for deduplication and tree expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub raw: String,
    pub url: String,
}

impl PageLink {
    pub fn new(raw: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            url: url.into(),
        }
    }
}

/// Everything discovered on one page, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub links: Vec<PageLink>,
    pub assets: Vec<String>,
}

/// Concurrency-safe page URL -> [`PageRecord`] store, append only.
#[derive(Debug, Default)]
pub struct PageGraph {
    pages: Mutex<HashMap<String, PageRecord>>,
}

impl PageGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append_child(&self, parent: &str, child: PageLink) {
        let mut pages = self.pages.lock().await;
        pages.entry(parent.to_string()).or_default().links.push(child);
    }

    pub async fn append_static_asset(&self, parent: &str, asset: String) {
        let mut pages = self.pages.lock().await;
        pages.entry(parent.to_string()).or_default().assets.push(asset);
    }

    /// Copy of the current contents, ordered by page URL.
    pub async fn snapshot(&self) -> BTreeMap<String, PageRecord> {
        let pages = self.pages.lock().await;
        pages
            .iter()
            .map(|(url, record)| (url.clone(), record.clone()))
            .collect()
    }
}
