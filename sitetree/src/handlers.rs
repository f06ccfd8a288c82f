use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use sitetree_core::crawl::{CrawlOptions, execute_crawl};
use sitetree_core::render::LinkLabel;
use sitetree_core::report::{ReportFormat, generate_report, save_report};
use std::path::PathBuf;
use tracing::Level;
use url::Url;

/// How the finished crawl should be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: ReportFormat,
    pub label: LinkLabel,
    pub output: Option<PathBuf>,
}

/// Install the stderr log subscriber. 0 = warn, 1 = info, 2 = debug, 3+ = trace.
pub fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(verbosity))
        .init();
}

pub fn log_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Parse a seed URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(line)
        && url.host_str().is_some()
    {
        return Some(url.to_string());
    }

    let with_scheme = format!("http://{}", line);
    match Url::parse(&with_scheme) {
        Ok(url) if url.host_str().is_some() => Some(url.to_string()),
        _ => None,
    }
}

pub fn crawl_options_from_args(args: &ArgMatches, quiet: bool) -> Result<CrawlOptions> {
    let raw_url = args
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url must be provided"))?;
    let url = parse_url_line(raw_url).ok_or_else(|| anyhow!("Invalid URL '{}'", raw_url))?;

    let mut options = CrawlOptions::new(url);
    if let Some(depth) = args.get_one::<usize>("depth") {
        options.max_depth = *depth;
    }
    if let Some(threads) = args.get_one::<u16>("threads") {
        options.concurrency = usize::from(*threads);
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        options.timeout_secs = *timeout;
    }
    options.show_progress_bars = !quiet;
    Ok(options)
}

pub fn output_settings_from_args(args: &ArgMatches) -> Result<OutputSettings> {
    let format = args
        .get_one::<String>("format")
        .map(|f| f.parse::<ReportFormat>())
        .transpose()
        .map_err(|e| anyhow!(e))?
        .unwrap_or_default();
    let label = if args.get_flag("canonical") {
        LinkLabel::Canonical
    } else {
        LinkLabel::Raw
    };

    Ok(OutputSettings {
        format,
        label,
        output: args.get_one::<PathBuf>("output").cloned(),
    })
}

pub async fn handle_crawl(args: &ArgMatches, quiet: bool) -> Result<()> {
    let options = crawl_options_from_args(args, quiet)?;
    let settings = output_settings_from_args(args)?;

    if !quiet {
        let domain = Url::parse(&options.url)
            .ok()
            .and_then(|u| u.host_str().map(String::from))
            .unwrap_or_else(|| options.url.clone());
        eprintln!("\nCrawling {}", domain);
        eprintln!("Max depth: {}", options.max_depth);
        eprintln!("Concurrent fetches: {}\n", options.concurrency);
    }

    let site = execute_crawl(options).await?;
    let report = generate_report(&site, settings.format, settings.label)
        .context("Failed to serialize report")?;

    match settings.output {
        Some(path) => {
            save_report(&report, &path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            if !quiet {
                eprintln!("Report saved to {}", path.display());
            }
        }
        None => print!("{}", report),
    }

    Ok(())
}
