//! Creation-date filtering

use crate::error::{ReportError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Layout of date bounds given on the command line
pub const BOUND_FORMAT: &str = "%Y/%m/%d";

/// Inclusive calendar-date range; a missing bound is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Range without bounds
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Create a range, rejecting `from` later than `to`
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ReportError::InvalidDateBound(format!(
                    "from-date {} is after to-date {}",
                    from.format(BOUND_FORMAT),
                    to.format(BOUND_FORMAT)
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Parse a `YYYY/MM/DD` bound
    pub fn parse_bound(text: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(text, BOUND_FORMAT).map_err(|e| {
            ReportError::InvalidDateBound(format!("'{}' is not a YYYY/MM/DD date ({})", text, e))
        })
    }

    /// Build a range from optional textual bounds
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = from.map(Self::parse_bound).transpose()?;
        let to = to.map(Self::parse_bound).transpose()?;
        Self::new(from, to)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a date falls inside the range (both ends inclusive)
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}
