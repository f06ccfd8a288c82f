// Report generation from a finished crawl

use crate::render::{LinkLabel, render_tree};
use sitetree_scanner::SiteMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown report format: {}", other)),
        }
    }
}

/// Render `site` in the requested format.
pub fn generate_report(
    site: &SiteMap,
    format: ReportFormat,
    label: LinkLabel,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(site, label)),
        ReportFormat::Json => generate_json_report(site),
    }
}

/// The page tree followed by a summary of the crawl.
pub fn generate_text_report(site: &SiteMap, label: LinkLabel) -> String {
    let mut report = render_tree(site, label);
    report.push('\n');
    report.push_str(&generate_summary(site));
    report
}

pub fn generate_summary(site: &SiteMap) -> String {
    let stats = &site.stats;
    let mut summary = String::new();
    summary.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    summary.push_str("# Summary:\n");
    summary.push_str(&format!("  Pages fetched: {}\n", stats.pages_fetched));
    summary.push_str(&format!("  Links recorded: {}\n", site.link_count()));
    summary.push_str(&format!("  Static assets: {}\n", site.asset_count()));
    if stats.fetch_failures > 0 {
        summary.push_str(&format!("  Fetch failures: {}\n", stats.fetch_failures));
    }
    if stats.non_html_skipped > 0 {
        summary.push_str(&format!("  Non-HTML skipped: {}\n", stats.non_html_skipped));
    }
    if stats.invalid_references > 0 {
        summary.push_str(&format!(
            "  Invalid references: {}\n",
            stats.invalid_references
        ));
    }
    summary
}

pub fn generate_json_report(site: &SiteMap) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(site)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
