pub mod crawl;
pub mod render;
pub mod report;

pub use crawl::{CrawlOptions, execute_crawl, execute_crawl_with};
pub use render::{LinkLabel, render_from, render_tree};
pub use report::{ReportFormat, generate_report, save_report};
