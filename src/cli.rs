//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::{load_positions, CsvAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::lookback_classifier::LookbackClassifier;
use crate::domain::bar::{BarInterval, PriceBar};
use crate::domain::config_validation::{validate_analysis_config, validate_data_config};
use crate::domain::error::TrendlensError;
use crate::domain::pattern::{annotate, AnnotationConfig, CandlestickPattern, Technical};
use crate::domain::security::Security;
use crate::domain::summary::PositionSummary;
use crate::domain::trend::net_change_by_trend_type;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;

#[derive(Parser, Debug)]
#[command(name = "trendlens", about = "Price-bar trend and pattern analyzer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Aggregate net change per trend type over a bar sequence
    Trends {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        exchange: Option<String>,
        #[arg(long)]
        interval: Option<String>,
        #[arg(long)]
        bar_count: Option<usize>,
        #[arg(long)]
        start: Option<NaiveDate>,
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Annotate daily bars with candlestick and technical flags
    Annotate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        exchange: Option<String>,
    },
    /// Summarize position returns from a trade-list CSV
    Positions {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        trades: PathBuf,
    },
    /// List available symbols on an exchange
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        exchange: Option<String>,
    },
    /// Show data range for a ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: String,
        #[arg(long)]
        exchange: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Trends {
            config,
            ticker,
            exchange,
            interval,
            bar_count,
            start,
            end,
        } => run_trends(
            &config,
            &ticker,
            exchange.as_deref(),
            interval.as_deref(),
            bar_count,
            start,
            end,
        ),
        Command::Annotate {
            config,
            ticker,
            exchange,
        } => run_annotate(&config, &ticker, exchange.as_deref()),
        Command::Positions { config, trades } => run_positions(&config, &trades),
        Command::ListSymbols { config, exchange } => {
            run_list_symbols(&config, exchange.as_deref())
        }
        Command::Info {
            config,
            ticker,
            exchange,
        } => run_info(&config, &ticker, exchange.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TrendlensError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn build_data_adapter(config: &FileConfigAdapter) -> Result<(CsvAdapter, String), ExitCode> {
    if let Err(e) = validate_data_config(config) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    let path = config.get_string("data", "path").unwrap_or_default();
    let exchange = config.get_string("data", "exchange").unwrap_or_default();
    Ok((CsvAdapter::new(PathBuf::from(path)), exchange))
}

fn resolve_exchange(override_value: Option<&str>, configured: &str) -> String {
    match override_value {
        Some(e) => e.to_uppercase(),
        None => configured.to_string(),
    }
}

fn fetch_security(
    adapter: &CsvAdapter,
    ticker: &str,
    exchange: &str,
    intervals: &[BarInterval],
) -> Result<Security, TrendlensError> {
    let mut security = Security::new(ticker.to_uppercase(), exchange.to_string());
    for interval in intervals {
        let bars = adapter.fetch_bars(
            &security.ticker,
            exchange,
            *interval,
            NaiveDate::MIN,
            NaiveDate::MAX,
        )?;
        security.set_bars(*interval, bars);
    }
    Ok(security)
}

fn run_trends(
    config_path: &PathBuf,
    ticker: &str,
    exchange_override: Option<&str>,
    interval_override: Option<&str>,
    bar_count_override: Option<usize>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_analysis_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let (adapter, configured_exchange) = match build_data_adapter(&config) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let exchange = resolve_exchange(exchange_override, &configured_exchange);

    let interval_str = interval_override
        .map(str::to_string)
        .or_else(|| config.get_string("analysis", "interval"))
        .unwrap_or_else(|| "daily".to_string());
    let Some(interval) = BarInterval::parse(&interval_str) else {
        eprintln!("error: unknown interval '{interval_str}'");
        return ExitCode::from(2);
    };

    let bar_count =
        bar_count_override.unwrap_or_else(|| config.get_int("analysis", "bar_count", 5) as usize);

    let start = start.or_else(|| parse_config_date(&config, "start_date"));
    let end = end.or_else(|| parse_config_date(&config, "end_date"));

    let mut security = match fetch_security(&adapter, ticker, &exchange, &[interval]) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Loaded {} {} bars for {}.{}",
        security.bar_count(interval),
        interval,
        security.ticker,
        exchange
    );

    let classifier = LookbackClassifier;
    let records = match net_change_by_trend_type(
        &mut security,
        &classifier,
        interval,
        bar_count,
        start,
        end,
    ) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if records.is_empty() {
        eprintln!("No bars to aggregate");
        return ExitCode::SUCCESS;
    }

    eprintln!("\n=== Net Change by Trend Type (lookback {bar_count}) ===");
    for record in &records {
        println!(
            "{:<10}  {:>4} segments  avg {:>8.4}%",
            record.trend_type.to_string(),
            record.occurrences,
            record.average_change * 100.0
        );
    }
    ExitCode::SUCCESS
}

fn run_annotate(config_path: &PathBuf, ticker: &str, exchange_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let (adapter, configured_exchange) = match build_data_adapter(&config) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let exchange = resolve_exchange(exchange_override, &configured_exchange);

    let mut security = match fetch_security(&adapter, ticker, &exchange, &[BarInterval::Daily]) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let annotation_config = AnnotationConfig::from_config(&config);
    annotate(&mut security, &annotation_config);

    let Some(series) = security.series(BarInterval::Daily) else {
        eprintln!("No daily bars for {}", security.ticker);
        return ExitCode::SUCCESS;
    };

    let hammers: Vec<&PriceBar> = series
        .bars()
        .iter()
        .filter(|b| b.candlestick_flag(CandlestickPattern::BullishHammer) == Some(true))
        .collect();
    let rising = series
        .bars()
        .iter()
        .filter(|b| b.technical_flag(Technical::RisingVolume) == Some(true))
        .count();
    let falling = series
        .bars()
        .iter()
        .filter(|b| b.technical_flag(Technical::FallingVolume) == Some(true))
        .count();

    eprintln!(
        "Annotated {} daily bars for {}.{}",
        series.len(),
        security.ticker,
        exchange
    );
    println!("rising volume:  {rising}");
    println!("falling volume: {falling}");
    println!("bullish hammers: {}", hammers.len());
    for bar in hammers {
        println!("  {}  close {:.2}", bar.date, bar.close);
    }
    ExitCode::SUCCESS
}

fn run_positions(config_path: &PathBuf, trades_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let (adapter, exchange) = match build_data_adapter(&config) {
        Ok(v) => v,
        Err(code) => return code,
    };

    eprintln!("Loading trades from {}", trades_path.display());
    let positions = match load_positions(trades_path) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let summary = match PositionSummary::from_positions(positions) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let security = match fetch_security(
        &adapter,
        summary.ticker(),
        &exchange,
        &[BarInterval::Daily],
    ) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let report = match summary.report(&security) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\n=== Position Summary: {} (as of {}) ===", summary.ticker(), report.as_of);
    println!("positions:       {}", report.position_count);
    println!("trades:          {}", report.trade_count);
    println!("days held:       {}", report.days_held);
    println!("net return:      ${:.2}", report.net_return_dollars);
    println!("net return:      {:.2}%", report.net_return_percent * 100.0);
    println!("per-day return:  ${:.4}", report.per_day_return_dollars);
    println!("per-day return:  {:.4}%", report.per_day_return_percent * 100.0);
    println!(
        "annualized:      {:.2}%",
        report.annualized_return_percent * 100.0
    );
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf, exchange_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let (adapter, configured_exchange) = match build_data_adapter(&config) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let exchange = resolve_exchange(exchange_override, &configured_exchange);

    let symbols = match adapter.list_symbols(&exchange) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found for exchange {exchange}");
    } else {
        for symbol in &symbols {
            println!("{symbol}");
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, ticker: &str, exchange_override: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let (adapter, configured_exchange) = match build_data_adapter(&config) {
        Ok(v) => v,
        Err(code) => return code,
    };
    let exchange = resolve_exchange(exchange_override, &configured_exchange);
    let ticker = ticker.to_uppercase();

    for interval in BarInterval::ALL {
        match adapter.get_data_range(&ticker, &exchange, interval) {
            Ok(Some((min_date, max_date, count))) => {
                println!(
                    "{}.{} {}: {} bars, {} to {}",
                    ticker, exchange, interval, count, min_date, max_date
                );
            }
            Ok(None) => {
                eprintln!("{}.{} {}: no data found", ticker, exchange, interval);
            }
            Err(e) => {
                eprintln!("error querying {}.{} {}: {}", ticker, exchange, interval, e);
            }
        }
    }
    ExitCode::SUCCESS
}

fn parse_config_date(config: &dyn ConfigPort, key: &str) -> Option<NaiveDate> {
    config
        .get_string("analysis", key)
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}
