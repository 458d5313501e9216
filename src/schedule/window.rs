use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::common::shift_month;

/// Half-open date range `[start, end)` used for projections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Errors that can occur when constructing [`DateWindow`] values.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum DateWindowError {
    #[error("date window end must be after start")]
    InvalidRange,
    #[error("date window is outside the supported calendar range")]
    OutOfRange,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateWindowError> {
        if end <= start {
            return Err(DateWindowError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Result<Self, DateWindowError> {
        let start = date.with_day(1).ok_or(DateWindowError::OutOfRange)?;
        let end = shift_month(start, 1).ok_or(DateWindowError::OutOfRange)?;
        Self::new(start, end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_ranges() {
        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            DateWindow::new(day, day),
            Err(DateWindowError::InvalidRange)
        );
    }

    #[test]
    fn month_window_spans_calendar_month() {
        let window =
            DateWindow::month_containing(NaiveDate::from_ymd_opt(2024, 2, 17).unwrap()).unwrap();
        assert_eq!(window.start, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(window.end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(window.days(), 29);
        assert!(window.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!window.contains(window.end));
    }
}
