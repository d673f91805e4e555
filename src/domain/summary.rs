//! Multi-position return aggregation for one security.

use crate::domain::bar::BarInterval;
use crate::domain::error::TrendlensError;
use crate::domain::position::Position;
use crate::domain::security::Security;
use chrono::NaiveDate;

const DAYS_PER_YEAR: f64 = 365.0;

/// One-or-more positions known to share a security, with summary return
/// statistics. Every mutation checks the security identity; a mismatched
/// position is rejected without touching the list.
#[derive(Debug, Clone)]
pub struct PositionSummary {
    ticker: String,
    exchange: String,
    positions: Vec<Position>,
}

/// Derived summary figures evaluated as of one date.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub as_of: NaiveDate,
    pub trade_count: usize,
    pub position_count: usize,
    pub days_held: i64,
    pub net_return_dollars: f64,
    pub net_return_percent: f64,
    pub per_day_return_dollars: f64,
    pub per_day_return_percent: f64,
    pub annualized_return_percent: f64,
}

impl PositionSummary {
    pub fn new(position: Position) -> Self {
        PositionSummary {
            ticker: position.ticker.clone(),
            exchange: position.exchange.clone(),
            positions: vec![position],
        }
    }

    /// Build a summary from a non-empty collection sharing one security.
    pub fn from_positions(positions: Vec<Position>) -> Result<Self, TrendlensError> {
        let mut iter = positions.into_iter();
        let first = iter.next().ok_or_else(|| TrendlensError::Data {
            reason: "cannot summarize an empty position list".into(),
        })?;

        let mut summary = PositionSummary::new(first);
        for position in iter {
            summary.add(position)?;
        }
        Ok(summary)
    }

    pub fn add(&mut self, position: Position) -> Result<(), TrendlensError> {
        if position.ticker != self.ticker {
            return Err(TrendlensError::SecurityMismatch {
                expected: self.ticker.clone(),
                found: position.ticker,
            });
        }
        self.positions.push(position);
        Ok(())
    }

    pub fn add_range(&mut self, positions: Vec<Position>) -> Result<(), TrendlensError> {
        for position in positions {
            self.add(position)?;
        }
        Ok(())
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn exchange(&self) -> &str {
        &self.exchange
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn trade_count(&self) -> usize {
        self.positions.iter().map(|p| p.trade_count()).sum()
    }

    /// Aggregate holding days: each position's days-held, summed.
    /// Concurrent positions deliberately count multiply.
    pub fn days_held(&self, as_of: NaiveDate) -> i64 {
        self.positions.iter().map(|p| p.days_held(as_of)).sum()
    }

    pub fn net_return_dollars(&self, as_of: NaiveDate, mark_price: f64) -> f64 {
        self.positions
            .iter()
            .map(|p| p.total_return_dollars(as_of, mark_price))
            .sum()
    }

    pub fn net_return_percent(&self, as_of: NaiveDate, mark_price: f64) -> f64 {
        self.positions
            .iter()
            .map(|p| p.total_return_percent(as_of, mark_price))
            .sum()
    }

    pub fn per_day_return_dollars(
        &self,
        as_of: NaiveDate,
        mark_price: f64,
    ) -> Result<f64, TrendlensError> {
        let days = self.days_held(as_of);
        if days == 0 {
            return Err(TrendlensError::ZeroDaysHeld);
        }
        Ok(self.net_return_dollars(as_of, mark_price) / days as f64)
    }

    pub fn per_day_return_percent(
        &self,
        as_of: NaiveDate,
        mark_price: f64,
    ) -> Result<f64, TrendlensError> {
        let days = self.days_held(as_of);
        if days == 0 {
            return Err(TrendlensError::ZeroDaysHeld);
        }
        Ok(self.net_return_percent(as_of, mark_price) / days as f64)
    }

    /// Compounded to a yearly rate: (1 + net)^(365 / daysHeld) - 1.
    pub fn annualized_return_percent(
        &self,
        as_of: NaiveDate,
        mark_price: f64,
    ) -> Result<f64, TrendlensError> {
        let days = self.days_held(as_of);
        if days == 0 {
            return Err(TrendlensError::ZeroDaysHeld);
        }
        let net = self.net_return_percent(as_of, mark_price);
        Ok((1.0 + net).powf(DAYS_PER_YEAR / days as f64) - 1.0)
    }

    /// Evaluate every derived figure as of the security's most recent daily
    /// bar, marking open quantity at its close.
    pub fn report(&self, security: &Security) -> Result<SummaryReport, TrendlensError> {
        if security.ticker != self.ticker {
            return Err(TrendlensError::SecurityMismatch {
                expected: self.ticker.clone(),
                found: security.ticker.clone(),
            });
        }
        let last_bar = security
            .last_bar(BarInterval::Daily)
            .ok_or_else(|| TrendlensError::NoData {
                ticker: self.ticker.clone(),
                interval: BarInterval::Daily,
            })?;
        let as_of = last_bar.date;
        let mark_price = last_bar.close;

        Ok(SummaryReport {
            as_of,
            trade_count: self.trade_count(),
            position_count: self.position_count(),
            days_held: self.days_held(as_of),
            net_return_dollars: self.net_return_dollars(as_of, mark_price),
            net_return_percent: self.net_return_percent(as_of, mark_price),
            per_day_return_dollars: self.per_day_return_dollars(as_of, mark_price)?,
            per_day_return_percent: self.per_day_return_percent(as_of, mark_price)?,
            annualized_return_percent: self.annualized_return_percent(as_of, mark_price)?,
        })
    }
}
