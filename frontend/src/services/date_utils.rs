use chrono::NaiveDate;

use crate::coordinator::ports::Clock;

/// Clock reading the browser's local date
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn today(&self) -> NaiveDate {
        let now = js_sys::Date::new_0();
        let year = now.get_full_year() as i32;
        let month = now.get_month() + 1; // JavaScript months are 0-indexed
        let day = now.get_date();

        NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
    }
}

/// `YYYY-MM-DD` for date inputs and request bodies
pub fn input_value(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a date input value; an empty input means "not set"
pub fn parse_input_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map(Some)
}

/// Format a date for list rows (e.g., "Mar 1, 2024")
pub fn format_short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format the date part of an ISO timestamp; falls back to the raw text
pub fn format_timestamp_date(timestamp: &str) -> String {
    let date_part = timestamp.split('T').next().unwrap_or(timestamp);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => format_short_date(date),
        Err(_) => timestamp.to_string(),
    }
}

/// Label for a `yyyy-mm` report key (e.g., "March 2024")
pub fn format_month_label(year_month: &str) -> Option<String> {
    NaiveDate::parse_from_str(&format!("{}-01", year_month.trim()), "%Y-%m-%d")
        .ok()
        .map(|date| date.format("%B %Y").to_string())
}

pub fn format_currency(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_input_date() {
        assert_eq!(parse_input_date("").unwrap(), None);
        assert_eq!(parse_input_date("   ").unwrap(), None);
        assert_eq!(parse_input_date("2024-03-01").unwrap(), Some(date("2024-03-01")));
        assert!(parse_input_date("03/01/2024").is_err());
    }

    #[test]
    fn test_format_short_date() {
        assert_eq!(format_short_date(date("2024-03-01")), "Mar 1, 2024");
        assert_eq!(format_short_date(date("2023-12-25")), "Dec 25, 2023");
    }

    #[test]
    fn test_format_timestamp_date() {
        assert_eq!(format_timestamp_date("2024-04-02T10:00:00"), "Apr 2, 2024");
        assert_eq!(format_timestamp_date("2024-04-02"), "Apr 2, 2024");
        assert_eq!(format_timestamp_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_month_label() {
        assert_eq!(format_month_label("2024-03").as_deref(), Some("March 2024"));
        assert_eq!(format_month_label("2023-12").as_deref(), Some("December 2023"));
        assert_eq!(format_month_label("2024-13"), None);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(42.5), "$42.50");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_input_value() {
        assert_eq!(input_value(date("2024-03-01")), "2024-03-01");
    }
}
