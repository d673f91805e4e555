#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use trendlens::domain::bar::{BarInterval, PriceBar};
use trendlens::domain::error::TrendlensError;
use trendlens::domain::position::{ExecutedTrade, Position};
use trendlens::domain::security::Security;
use trendlens::ports::data_port::DataPort;

pub struct MockDataPort {
    pub data: HashMap<(String, BarInterval), Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, interval: BarInterval, bars: Vec<PriceBar>) -> Self {
        self.data.insert((ticker.to_string(), interval), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        ticker: &str,
        _exchange: &str,
        interval: BarInterval,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TrendlensError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TrendlensError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(&(ticker.to_string(), interval))
            .map(|bars| {
                bars.iter()
                    .filter(|b| b.date >= start_date && b.date <= end_date)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn list_symbols(&self, _exchange: &str) -> Result<Vec<String>, TrendlensError> {
        let mut symbols: Vec<String> = self.data.keys().map(|(t, _)| t.clone()).collect();
        symbols.sort();
        symbols.dedup();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        ticker: &str,
        _exchange: &str,
        interval: BarInterval,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TrendlensError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(TrendlensError::Data {
                reason: reason.clone(),
            });
        }
        match self.data.get(&(ticker.to_string(), interval)) {
            Some(bars) if !bars.is_empty() => {
                let min = bars.iter().map(|b| b.date).min().unwrap();
                let max = bars.iter().map(|b| b.date).max().unwrap();
                Ok(Some((min, max, bars.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(d: &str, close: f64) -> PriceBar {
    PriceBar::new(
        NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap(),
        close - 1.0,
        close + 1.0,
        close - 2.0,
        close,
        1000,
    )
}

pub fn make_security(ticker: &str, interval: BarInterval, bars: Vec<PriceBar>) -> Security {
    let mut security = Security::new(ticker.to_string(), "ASX".to_string());
    security.set_bars(interval, bars);
    security
}

pub fn generate_bars(start_date: &str, count: usize, start_price: f64) -> Vec<PriceBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| {
            let price = start_price + i as f64;
            PriceBar::new(
                start + chrono::Duration::days(i as i64),
                price,
                price + 1.0,
                price - 1.0,
                price,
                1000,
            )
        })
        .collect()
}

pub fn round_trip_position(
    ticker: &str,
    entry: NaiveDate,
    exit: NaiveDate,
    quantity: i64,
    entry_price: f64,
    exit_price: f64,
) -> Position {
    let mut pos = Position::new(ticker.to_string(), "ASX".to_string());
    pos.record_trade(ExecutedTrade {
        date: entry,
        quantity,
        price: entry_price,
    });
    pos.record_trade(ExecutedTrade {
        date: exit,
        quantity: -quantity,
        price: exit_price,
    });
    pos
}
