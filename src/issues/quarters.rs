use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fiscal quarter. The fiscal year starts in November.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Buckets a date: Q1 = Nov-Jan, Q2 = Feb-Apr, Q3 = May-Jul, Q4 = Aug-Oct.
    pub fn of(date: NaiveDate) -> Self {
        match date.month() {
            11 | 12 | 1 => Quarter::Q1,
            2..=4 => Quarter::Q2,
            5..=7 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quarter::Q1 => "Q1",
            Quarter::Q2 => "Q2",
            Quarter::Q3 => "Q3",
            Quarter::Q4 => "Q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarter_for_month(month: u32) -> Quarter {
        Quarter::of(NaiveDate::from_ymd_opt(2024, month, 15).unwrap())
    }

    #[test]
    fn fiscal_year_starts_in_november() {
        for month in [11, 12, 1] {
            assert_eq!(quarter_for_month(month), Quarter::Q1, "month {month}");
        }
    }

    #[test]
    fn maps_every_month() {
        let expected = [
            (2, Quarter::Q2),
            (3, Quarter::Q2),
            (4, Quarter::Q2),
            (5, Quarter::Q3),
            (6, Quarter::Q3),
            (7, Quarter::Q3),
            (8, Quarter::Q4),
            (9, Quarter::Q4),
            (10, Quarter::Q4),
        ];
        for (month, quarter) in expected {
            assert_eq!(quarter_for_month(month), quarter, "month {month}");
        }
    }

    #[test]
    fn month_boundaries_follow_calendar_days() {
        let last_of_october = NaiveDate::from_ymd_opt(2023, 10, 31).unwrap();
        let first_of_november = NaiveDate::from_ymd_opt(2023, 11, 1).unwrap();
        assert_eq!(Quarter::of(last_of_october), Quarter::Q4);
        assert_eq!(Quarter::of(first_of_november), Quarter::Q1);
    }

    #[test]
    fn displays_label() {
        assert_eq!(Quarter::Q3.to_string(), "Q3");
    }
}
