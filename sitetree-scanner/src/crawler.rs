use crate::error::Result;
use crate::fetch::{HttpFetcher, PageFetcher, is_html_content_type};
use crate::graph::{PageGraph, PageLink};
use crate::resolve::{parse_seed, resolve, same_domain};
use crate::result::{CrawlCounters, SiteMap};
use crate::tokenize::{Reference, start_tags};
use crate::tracker::TaskTracker;
use crate::visited::VisitedSet;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, trace, warn};
use url::Url;

/// Called with `(remaining_depth, url)` each time a page is about to be fetched.
pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

pub const DEFAULT_MAX_DEPTH: usize = 2;
pub const DEFAULT_CONCURRENCY: usize = 10;

pub struct Crawler {
    fetcher: Arc<dyn PageFetcher>,
    max_depth: usize,
    concurrency: usize,
    progress_callback: Option<ProgressCallback>,
}

/// State shared by every task of a single crawl.
struct CrawlContext {
    fetcher: Arc<dyn PageFetcher>,
    origin: Url,
    visited: VisitedSet,
    graph: PageGraph,
    tracker: TaskTracker,
    fetch_limit: Semaphore,
    counters: CrawlCounters,
    progress_callback: Option<ProgressCallback>,
}

impl Crawler {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            max_depth: DEFAULT_MAX_DEPTH,
            concurrency: DEFAULT_CONCURRENCY,
            progress_callback: None,
        }
    }

    /// Crawler over a real HTTP client.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::with_timeout(timeout_secs)?)))
    }

    /// Maximum link-following depth. 0 means the seed is never fetched.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Upper bound on fetches in flight at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Crawl the domain of `seed` and return the discovered page graph.
    ///
    /// Only an unusable seed fails the crawl. Everything below the root task
    /// is recovered locally, so the result holds whatever was collected.
    pub async fn crawl(&self, seed: &str) -> Result<SiteMap> {
        let origin = parse_seed(seed)?;
        info!(
            url = %origin,
            max_depth = self.max_depth,
            concurrency = self.concurrency,
            "starting crawl"
        );

        let ctx = Arc::new(CrawlContext {
            fetcher: self.fetcher.clone(),
            origin: origin.clone(),
            visited: VisitedSet::new(),
            graph: PageGraph::new(),
            tracker: TaskTracker::new(),
            fetch_limit: Semaphore::new(self.concurrency),
            counters: CrawlCounters::default(),
            progress_callback: self.progress_callback.clone(),
        });

        ctx.visited.try_mark(&origin).await;
        spawn_page_task(&ctx, origin.clone(), self.max_depth);
        ctx.tracker.wait().await;

        let site = SiteMap {
            root: origin.to_string(),
            pages: ctx.graph.snapshot().await,
            stats: ctx.counters.snapshot(),
        };
        info!(
            pages_fetched = site.stats.pages_fetched,
            fetch_failures = site.stats.fetch_failures,
            "crawl complete"
        );
        Ok(site)
    }
}

fn spawn_page_task(ctx: &Arc<CrawlContext>, url: Url, remaining_depth: usize) {
    let guard = ctx.tracker.enter();
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let _guard = guard;
        fetch_and_dispatch(&ctx, url, remaining_depth).await;
    });
}

fn spawn_link_task(ctx: &Arc<CrawlContext>, raw: String, parent: Url, remaining_depth: usize) {
    let guard = ctx.tracker.enter();
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let _guard = guard;
        resolve_link(&ctx, raw, parent, remaining_depth).await;
    });
}

fn spawn_asset_task(ctx: &Arc<CrawlContext>, raw: String, parent: Url) {
    let guard = ctx.tracker.enter();
    let ctx = ctx.clone();
    tokio::spawn(async move {
        let _guard = guard;
        resolve_asset(&ctx, raw, parent).await;
    });
}

/// Fetch one page and spawn a task per distinct reference found on it.
async fn fetch_and_dispatch(ctx: &Arc<CrawlContext>, url: Url, remaining_depth: usize) {
    if remaining_depth == 0 {
        trace!(%url, "depth exhausted");
        return;
    }

    if let Some(ref callback) = ctx.progress_callback {
        callback(remaining_depth, url.to_string());
    }

    let fetched = {
        let Ok(_permit) = ctx.fetch_limit.acquire().await else {
            warn!(%url, "fetch limiter closed, abandoning page");
            return;
        };
        ctx.fetcher.fetch(&url).await
    };

    let page = match fetched {
        Ok(page) => page,
        Err(e) => {
            warn!(%url, error = %e, "fetch failed");
            CrawlCounters::bump(&ctx.counters.fetch_failures);
            return;
        }
    };
    CrawlCounters::bump(&ctx.counters.pages_fetched);

    let body = match page.body {
        Some(body) if is_html_content_type(page.content_type.as_deref()) => body,
        _ => {
            debug!(
                %url,
                content_type = page.content_type.as_deref().unwrap_or("unknown"),
                "skipping non-HTML response"
            );
            CrawlCounters::bump(&ctx.counters.non_html_skipped);
            return;
        }
    };

    // Keyed by the raw attribute value, shared by links and assets.
    let mut dispatched: HashSet<String> = HashSet::new();
    for tag in start_tags(&body) {
        let Some(reference) = tag.reference() else {
            continue;
        };
        if !dispatched.insert(reference.raw().to_string()) {
            trace!(%url, reference = reference.raw(), "already dispatched");
            continue;
        }

        match reference {
            Reference::Link(raw) => spawn_link_task(ctx, raw, url.clone(), remaining_depth),
            Reference::Asset(raw) => spawn_asset_task(ctx, raw, url.clone()),
        }
    }

    debug!(%url, references = dispatched.len(), "page dispatched");
}

async fn resolve_link(ctx: &Arc<CrawlContext>, raw: String, parent: Url, remaining_depth: usize) {
    let resolved = match resolve(&raw, &parent) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %parent, reference = %raw, error = %e, "skipping invalid link");
            CrawlCounters::bump(&ctx.counters.invalid_references);
            return;
        }
    };

    if !same_domain(&resolved, &ctx.origin) {
        debug!(url = %resolved, parent = %parent, "link out of scope");
        return;
    }

    if raw != "/" {
        ctx.graph
            .append_child(parent.as_str(), PageLink::new(raw, resolved.as_str()))
            .await;
    }

    if ctx.visited.try_mark(&resolved).await {
        spawn_page_task(ctx, resolved, remaining_depth.saturating_sub(1));
    } else {
        trace!(url = %resolved, "already visited");
    }
}

async fn resolve_asset(ctx: &Arc<CrawlContext>, raw: String, parent: Url) {
    let resolved = match resolve(&raw, &parent) {
        Ok(url) => url,
        Err(e) => {
            warn!(url = %parent, reference = %raw, error = %e, "skipping invalid asset");
            CrawlCounters::bump(&ctx.counters.invalid_references);
            return;
        }
    };

    let asset = resolved.to_string();
    if asset != "/" {
        ctx.graph.append_static_asset(parent.as_str(), asset).await;
    }
}
