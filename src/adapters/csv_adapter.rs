//! CSV file data adapter.
//!
//! Stands in for the market data store: one file per (ticker, exchange,
//! interval) named `{TICKER}_{EXCHANGE}_{interval}.csv` with
//! `date,open,high,low,close,volume` columns, plus a trade-list loader for
//! building positions.

use crate::domain::bar::{BarInterval, PriceBar};
use crate::domain::error::TrendlensError;
use crate::domain::position::{ExecutedTrade, Position};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str, exchange: &str, interval: BarInterval) -> PathBuf {
        self.base_path
            .join(format!("{}_{}_{}.csv", ticker, exchange, interval.tag()))
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<T, TrendlensError>
where
    T::Err: std::fmt::Display,
{
    record
        .get(index)
        .ok_or_else(|| TrendlensError::Data {
            reason: format!("missing {} column", name),
        })?
        .parse()
        .map_err(|e| TrendlensError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

fn parse_date_field(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<NaiveDate, TrendlensError> {
    let text = record.get(index).ok_or_else(|| TrendlensError::Data {
        reason: format!("missing {} column", name),
    })?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|e| TrendlensError::Data {
        reason: format!("invalid {} value: {}", name, e),
    })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        ticker: &str,
        exchange: &str,
        interval: BarInterval,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TrendlensError> {
        let path = self.csv_path(ticker, exchange, interval);
        let content = fs::read_to_string(&path).map_err(|e| TrendlensError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TrendlensError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date = parse_date_field(&record, 0, "date")?;
            if date < start_date || date > end_date {
                continue;
            }

            let open: f64 = parse_field(&record, 1, "open")?;
            let high: f64 = parse_field(&record, 2, "high")?;
            let low: f64 = parse_field(&record, 3, "low")?;
            let close: f64 = parse_field(&record, 4, "close")?;
            let volume: i64 = parse_field(&record, 5, "volume")?;

            bars.push(PriceBar::new(date, open, high, low, close, volume));
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, TrendlensError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TrendlensError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let suffix = format!("_{}_{}.csv", exchange, BarInterval::Daily.tag());
        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| TrendlensError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if name_str.ends_with(&suffix) {
                let ticker = &name_str[..name_str.len() - suffix.len()];
                symbols.push(ticker.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        ticker: &str,
        exchange: &str,
        interval: BarInterval,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TrendlensError> {
        if !self.csv_path(ticker, exchange, interval).exists() {
            return Ok(None);
        }
        let bars = self.fetch_bars(ticker, exchange, interval, NaiveDate::MIN, NaiveDate::MAX)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}

/// Load positions from a trade-list CSV with
/// `position_id,ticker,exchange,date,quantity,price` columns. Rows sharing a
/// `position_id` form one position; positions keep first-appearance order and
/// trades are ordered by date.
pub fn load_positions<P: AsRef<Path>>(path: P) -> Result<Vec<Position>, TrendlensError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| TrendlensError::Data {
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;

    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut positions: Vec<Position> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();

    for result in rdr.records() {
        let record = result.map_err(|e| TrendlensError::Data {
            reason: format!("CSV parse error: {}", e),
        })?;

        let id: String = parse_field(&record, 0, "position_id")?;
        let ticker: String = parse_field(&record, 1, "ticker")?;
        let exchange: String = parse_field(&record, 2, "exchange")?;
        let date = parse_date_field(&record, 3, "date")?;
        let quantity: i64 = parse_field(&record, 4, "quantity")?;
        let price: f64 = parse_field(&record, 5, "price")?;

        let index = match by_id.get(&id) {
            Some(&i) => i,
            None => {
                positions.push(Position::new(ticker.clone(), exchange.clone()));
                by_id.insert(id, positions.len() - 1);
                positions.len() - 1
            }
        };

        positions[index].record_trade(ExecutedTrade {
            date,
            quantity,
            price,
        });
    }

    for position in &mut positions {
        position.trades.sort_by_key(|t| t.date);
    }

    Ok(positions)
}
