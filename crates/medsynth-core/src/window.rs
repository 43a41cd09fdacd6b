use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Half-open `[start, end)` range bounding every sampled event date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TemporalWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start >= end {
            return Err(Error::Configuration(format!(
                "start date {start} must precede end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    pub fn contains_datetime(&self, value: NaiveDateTime) -> bool {
        value >= self.start_datetime() && value < self.end_datetime()
    }

    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn rejects_inverted_window() {
        let result = TemporalWindow::new(date(2025, 3, 23), date(2010, 1, 1));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn end_is_exclusive() {
        let window = TemporalWindow::new(date(2010, 1, 1), date(2025, 3, 23)).expect("window");
        assert!(window.contains(date(2010, 1, 1)));
        assert!(window.contains(date(2025, 3, 22)));
        assert!(!window.contains(date(2025, 3, 23)));
        assert!(!window.contains_datetime(window.end_datetime()));
    }
}
