pub mod crawler;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod resolve;
pub mod result;
pub mod tokenize;
pub mod tracker;
pub mod visited;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher, is_html_content_type};
pub use graph::{PageGraph, PageLink, PageRecord};
pub use result::{CrawlStats, SiteMap};
