//! 时间工具函数: reporting periods from the local clock

use chrono::{Local, NaiveDate};
use shared::models::Period;

use super::{AppError, AppResult};

/// Today's date in server local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Period containing today (server local time)
pub fn current_period() -> Period {
    Period::from_date(today())
}

/// Parse an optional `YYYY-MM` query value, defaulting to the current period
pub fn parse_period_or_current(raw: Option<&str>) -> AppResult<Period> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => parse_period(s),
        None => Ok(current_period()),
    }
}

/// Parse a `YYYY-MM` value
pub fn parse_period(raw: &str) -> AppResult<Period> {
    raw.parse::<Period>().map_err(|e| {
        AppError::with_message(shared::ErrorCode::InvalidPeriod, e.to_string())
            .with_detail("period", raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period_or_current() {
        assert_eq!(
            parse_period_or_current(Some("2024-03")).unwrap().to_string(),
            "2024-03"
        );
        assert_eq!(parse_period_or_current(None).unwrap(), current_period());
        assert_eq!(parse_period_or_current(Some(" ")).unwrap(), current_period());
    }

    #[test]
    fn test_parse_period_error_code() {
        let err = parse_period("2024-13").unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::InvalidPeriod);
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }
}
