//! Position records and as-of return computations.

use chrono::NaiveDate;

/// One executed fill. Buys carry positive quantity, sells negative.
#[derive(Debug, Clone)]
pub struct ExecutedTrade {
    pub date: NaiveDate,
    pub quantity: i64,
    pub price: f64,
}

/// One held lot of a security with its executed trades, in execution order.
#[derive(Debug, Clone)]
pub struct Position {
    pub ticker: String,
    pub exchange: String,
    pub trades: Vec<ExecutedTrade>,
}

impl Position {
    pub fn new(ticker: String, exchange: String) -> Self {
        Position {
            ticker,
            exchange,
            trades: Vec::new(),
        }
    }

    pub fn record_trade(&mut self, trade: ExecutedTrade) {
        self.trades.push(trade);
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn entry_date(&self) -> Option<NaiveDate> {
        self.trades.first().map(|t| t.date)
    }

    /// Net signed quantity across trades executed on or before `as_of`.
    pub fn open_quantity(&self, as_of: NaiveDate) -> i64 {
        self.trades
            .iter()
            .filter(|t| t.date <= as_of)
            .map(|t| t.quantity)
            .sum()
    }

    /// Days from entry to `as_of`, or to the closing trade if the lot was
    /// flat by then. Zero when nothing was executed on or before `as_of`.
    pub fn days_held(&self, as_of: NaiveDate) -> i64 {
        let executed: Vec<&ExecutedTrade> =
            self.trades.iter().filter(|t| t.date <= as_of).collect();
        let (Some(first), Some(last)) = (executed.first(), executed.last()) else {
            return 0;
        };

        let net: i64 = executed.iter().map(|t| t.quantity).sum();
        let end = if net == 0 { last.date } else { as_of };
        (end - first.date).num_days()
    }

    /// Cost of the opening trades executed on or before `as_of`.
    pub fn entry_cost(&self, as_of: NaiveDate) -> f64 {
        self.trades
            .iter()
            .filter(|t| t.date <= as_of && t.quantity > 0)
            .map(|t| t.quantity as f64 * t.price)
            .sum()
    }

    /// Realized plus unrealized return in currency: trade cash flows plus the
    /// remaining open quantity marked at `mark_price`.
    pub fn total_return_dollars(&self, as_of: NaiveDate, mark_price: f64) -> f64 {
        let cash_flow: f64 = self
            .trades
            .iter()
            .filter(|t| t.date <= as_of)
            .map(|t| -(t.quantity as f64) * t.price)
            .sum();
        cash_flow + self.open_quantity(as_of) as f64 * mark_price
    }

    /// Total return as a fraction of entry cost. A position with no entry
    /// cost as of `as_of` reports zero.
    pub fn total_return_percent(&self, as_of: NaiveDate, mark_price: f64) -> f64 {
        let cost = self.entry_cost(as_of);
        if cost == 0.0 {
            return 0.0;
        }
        self.total_return_dollars(as_of, mark_price) / cost
    }
}
