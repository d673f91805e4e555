//! Market data access port trait.

use crate::domain::bar::{BarInterval, PriceBar};
use crate::domain::error::TrendlensError;
use chrono::NaiveDate;

pub trait DataPort {
    fn fetch_bars(
        &self,
        ticker: &str,
        exchange: &str,
        interval: BarInterval,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceBar>, TrendlensError>;

    fn list_symbols(&self, exchange: &str) -> Result<Vec<String>, TrendlensError>;

    fn get_data_range(
        &self,
        ticker: &str,
        exchange: &str,
        interval: BarInterval,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, TrendlensError>;
}
