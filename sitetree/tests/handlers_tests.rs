use sitetree::commands::command_argument_builder;
use sitetree::handlers::*;
use sitetree_core::render::LinkLabel;
use sitetree_core::report::ReportFormat;
use std::path::PathBuf;
use tracing::Level;

fn crawl_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["sitetree", "crawl"];
    argv.extend_from_slice(args);
    let matches = command_argument_builder()
        .try_get_matches_from(argv)
        .unwrap();
    let (_, crawl) = matches.subcommand().unwrap();
    crawl.clone()
}

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com/".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("http://example.com/".to_string()));
}

#[test]
fn test_parse_url_line_host_with_port() {
    let result = parse_url_line("localhost:8080/docs");
    assert_eq!(result, Some("http://localhost:8080/docs".to_string()));
}

#[test]
fn test_parse_url_line_trims_whitespace() {
    let result = parse_url_line("  https://example.com/a  ");
    assert_eq!(result, Some("https://example.com/a".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    assert_eq!(parse_url_line("not a valid url!!!"), None);
    assert_eq!(parse_url_line(""), None);
}

#[test]
fn test_log_level() {
    assert_eq!(log_level(0), Level::WARN);
    assert_eq!(log_level(1), Level::INFO);
    assert_eq!(log_level(2), Level::DEBUG);
    assert_eq!(log_level(3), Level::TRACE);
    assert_eq!(log_level(9), Level::TRACE);
}

#[test]
fn test_crawl_options_from_args() {
    let args = crawl_matches(&["-u", "example.com", "-d", "4", "-t", "3", "--timeout", "7"]);
    let options = crawl_options_from_args(&args, false).unwrap();

    assert_eq!(options.url, "http://example.com/");
    assert_eq!(options.max_depth, 4);
    assert_eq!(options.concurrency, 3);
    assert_eq!(options.timeout_secs, 7);
    assert!(options.show_progress_bars);
}

#[test]
fn test_crawl_options_quiet_hides_progress() {
    let args = crawl_matches(&["-u", "https://example.com/"]);
    let options = crawl_options_from_args(&args, true).unwrap();
    assert!(!options.show_progress_bars);
    assert_eq!(options.max_depth, 2);
}

#[test]
fn test_crawl_options_invalid_url() {
    let args = crawl_matches(&["-u", "not a valid url!!!"]);
    let err = crawl_options_from_args(&args, true).unwrap_err();
    assert!(err.to_string().contains("Invalid URL"));
}

#[test]
fn test_output_settings_defaults() {
    let args = crawl_matches(&["-u", "example.com"]);
    let settings = output_settings_from_args(&args).unwrap();
    assert_eq!(
        settings,
        OutputSettings {
            format: ReportFormat::Text,
            label: LinkLabel::Raw,
            output: None,
        }
    );
}

#[test]
fn test_output_settings_json_canonical_file() {
    let args = crawl_matches(&[
        "-u",
        "example.com",
        "-f",
        "json",
        "--canonical",
        "-o",
        "/tmp/site.json",
    ]);
    let settings = output_settings_from_args(&args).unwrap();
    assert_eq!(settings.format, ReportFormat::Json);
    assert_eq!(settings.label, LinkLabel::Canonical);
    assert_eq!(settings.output, Some(PathBuf::from("/tmp/site.json")));
}

#[tokio::test]
async fn test_handle_crawl_writes_report_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("tree.txt");
    let path_str = path.to_string_lossy().to_string();

    // Depth 0 never touches the network.
    let args = crawl_matches(&["-u", "example.com", "-d", "0", "-q", "-o", &path_str]);
    handle_crawl(&args, true).await?;

    let written = std::fs::read_to_string(&path)?;
    assert!(written.starts_with("└── http://example.com/\n"));
    assert!(written.contains("Pages fetched: 0"));
    Ok(())
}
