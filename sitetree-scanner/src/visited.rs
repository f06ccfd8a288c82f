use std::collections::HashSet;
use tokio::sync::Mutex;
use url::Url;

/// Crawl-wide set of canonical URLs that have been claimed for fetching.
///
/// Entries are never removed. [`VisitedSet::try_mark`] is the only gate through
/// which new page fetches are scheduled.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: Mutex<HashSet<String>>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `url` if absent. Returns `true` iff this call performed the
    /// insertion and so owns the right to process it.
    pub async fn try_mark(&self, url: &Url) -> bool {
        let mut urls = self.urls.lock().await;
        urls.insert(url.as_str().to_string())
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.urls.lock().await.len()
    }
}
