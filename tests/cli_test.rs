//! CLI argument parsing and config loading tests.

use clap::Parser;
use std::io::Write;
use trendlens::cli::{load_config, Cli, Command};
use trendlens::domain::config_validation::{validate_analysis_config, validate_data_config};
use trendlens::domain::pattern::AnnotationConfig;

fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const VALID_INI: &str = r#"
[data]
path = /var/lib/trendlens/bars
exchange = ASX

[analysis]
bar_count = 5
interval = daily
start_date = 2020-01-01
end_date = 2024-12-31

[patterns]
bullish_hammer = true
volume = false
"#;

#[test]
fn parses_trends_command() {
    let cli = Cli::try_parse_from([
        "trendlens",
        "trends",
        "--config",
        "analysis.ini",
        "--ticker",
        "bhp",
        "--bar-count",
        "8",
        "--start",
        "2024-01-01",
        "--end",
        "2024-06-30",
    ])
    .unwrap();

    match cli.command {
        Command::Trends {
            ticker,
            bar_count,
            start,
            end,
            ..
        } => {
            assert_eq!(ticker, "bhp");
            assert_eq!(bar_count, Some(8));
            assert!(start.is_some());
            assert!(end.is_some());
        }
        other => panic!("expected trends command, got {other:?}"),
    }
}

#[test]
fn trends_requires_ticker() {
    let result = Cli::try_parse_from(["trendlens", "trends", "--config", "analysis.ini"]);
    assert!(result.is_err());
}

#[test]
fn rejects_malformed_start_date() {
    let result = Cli::try_parse_from([
        "trendlens",
        "trends",
        "--config",
        "analysis.ini",
        "--ticker",
        "BHP",
        "--start",
        "01/01/2024",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_positions_command() {
    let cli = Cli::try_parse_from([
        "trendlens",
        "positions",
        "--config",
        "analysis.ini",
        "--trades",
        "trades.csv",
    ])
    .unwrap();
    assert!(matches!(cli.command, Command::Positions { .. }));
}

#[test]
fn load_config_reads_ini_from_disk() {
    let file = write_temp_ini(VALID_INI);
    let config = load_config(&file.path().to_path_buf()).unwrap();

    assert!(validate_data_config(&config).is_ok());
    assert!(validate_analysis_config(&config).is_ok());
}

#[test]
fn load_config_fails_for_missing_file() {
    let result = load_config(&std::path::PathBuf::from("/nonexistent/analysis.ini"));
    assert!(result.is_err());
}

#[test]
fn annotation_config_honours_ini_toggles() {
    let file = write_temp_ini(VALID_INI);
    let config = load_config(&file.path().to_path_buf()).unwrap();
    let annotation = AnnotationConfig::from_config(&config);

    // volume = false in the INI overrides the registry default.
    assert!(annotation.enabled("bullish_hammer", true));
    assert!(!annotation.enabled("volume", true));
}
