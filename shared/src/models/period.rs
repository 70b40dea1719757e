//! Reporting period (calendar year-month)

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Period parse error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period '{0}', expected YYYY-MM")]
pub struct InvalidPeriod(pub String);

/// A calendar year-month, rendered as `YYYY-MM`
///
/// Ordering is chronological, which matches lexicographic order of the
/// rendered form for four-digit years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: u16,
    month: u8,
}

impl Period {
    /// Build a period; years run 0001..=9999, months 1..=12
    pub fn new(year: u16, month: u8) -> Result<Self, InvalidPeriod> {
        if !(1..=12).contains(&month) || !(1..=9999).contains(&year) {
            return Err(InvalidPeriod(format!("{:04}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// Period containing the given calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year().clamp(1, 9999) as u16,
            month: date.month() as u8,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    /// The month before this one; January rolls back to December of the prior year
    ///
    /// `0001-01` has no predecessor and is returned unchanged.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            if self.year == 1 {
                return *self;
            }
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Japanese display form used by the CSV export: `2024年03月`
    pub fn display_ja(&self) -> String {
        format!("{:04}年{:02}月", self.year, self.month)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = InvalidPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidPeriod(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: u16 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Period {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let period = p("2024-03");
        assert_eq!(period.year(), 2024);
        assert_eq!(period.month(), 3);
        assert_eq!(period.to_string(), "2024-03");
        assert_eq!(period.display_ja(), "2024年03月");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "2024", "2024-3", "2024-13", "2024-00", "24-03", "2024/03", "abcd-ef"] {
            assert!(bad.parse::<Period>().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_previous_rolls_over_year() {
        assert_eq!(p("2024-03").previous(), p("2024-02"));
        assert_eq!(p("2024-01").previous(), p("2023-12"));
    }

    #[test]
    fn test_year_zero_rejected_and_first_month_has_no_predecessor() {
        assert!("0000-01".parse::<Period>().is_err());
        assert!(Period::new(0, 12).is_err());

        let first = p("0001-01");
        assert_eq!(first.previous(), first);
        assert!(first.previous() <= first);
        assert_eq!(p("0002-01").previous(), p("0001-12"));
    }

    #[test]
    fn test_ordering_is_chronological() {
        let mut periods = vec![p("2024-03"), p("2023-12"), p("2024-01")];
        periods.sort();
        assert_eq!(periods, vec![p("2023-12"), p("2024-01"), p("2024-03")]);
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        assert_eq!(Period::from_date(date), p("2024-11"));
    }

    #[test]
    fn test_serde_as_string() {
        assert_eq!(serde_json::to_string(&p("2024-02")).unwrap(), "\"2024-02\"");
        let period: Period = serde_json::from_str("\"2023-12\"").unwrap();
        assert_eq!(period, p("2023-12"));
        assert!(serde_json::from_str::<Period>("\"2023-1\"").is_err());
    }
}
