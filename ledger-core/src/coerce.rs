//! Lossy cell coercion: thousands-separated numbers and day-first dates.
//!
//! Nothing here fails. A cell that cannot be read becomes `None` and is
//! counted in [`CoercionStats`] so callers can report how dirty the input was.

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Serialize};

/// Counts of non-empty cells that degraded to null during coercion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoercionStats {
    pub numeric_failures: usize,
    pub date_failures: usize,
}

impl CoercionStats {
    pub fn number(&mut self, cell: Option<&str>) -> Option<f64> {
        let parsed = parse_number(cell);
        if parsed.is_none() && !is_blank(cell) {
            self.numeric_failures += 1;
        }
        parsed
    }

    pub fn integer(&mut self, cell: Option<&str>) -> Option<i64> {
        let parsed = parse_integer(cell);
        if parsed.is_none() && !is_blank(cell) {
            self.numeric_failures += 1;
        }
        parsed
    }

    pub fn date(&mut self, cell: Option<&str>) -> Option<NaiveDate> {
        let parsed = parse_day_first_date(cell);
        if parsed.is_none() && !is_blank(cell) {
            self.date_failures += 1;
        }
        parsed
    }

    pub fn total(&self) -> usize {
        self.numeric_failures + self.date_failures
    }
}

fn is_blank(cell: Option<&str>) -> bool {
    cell.is_none_or(|c| c.trim().is_empty())
}

/// Parse a numeric cell after dropping `,` separators and surrounding whitespace.
///
/// Non-finite results (`nan`, `inf`) are treated as unparseable.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    let cleaned = cell?.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer cell. Whole-valued decimals such as `"3.0"` are accepted.
pub fn parse_integer(cell: Option<&str>) -> Option<i64> {
    let cleaned = cell?.replace(',', "");
    let cleaned = cleaned.trim();
    if let Ok(v) = cleaned.parse::<i64>() {
        return Some(v);
    }
    let v = parse_number(Some(cleaned))?;
    if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Parse a date with the day preceding the month in ambiguous numeric forms.
///
/// Accepts `01/02/2024`, `01-02-24`, `01.02.2024`, ISO `2024-02-01`,
/// `1 Feb 2024`, `01-Feb-2024`, `February 1, 2024`. A trailing time of day is
/// ignored. When the day-first reading is impossible (`02/13/2024`) the
/// month-first reading is used instead.
pub fn parse_day_first_date(cell: Option<&str>) -> Option<NaiveDate> {
    let text = strip_time_of_day(cell?.trim());
    if text.is_empty() {
        return None;
    }
    numeric_date(&text).or_else(|| textual_date(&text))
}

/// Format a date the way statements print it: `dd/mm/yyyy`.
pub fn format_day_first(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

fn strip_time_of_day(text: &str) -> String {
    // ISO timestamps: 2024-02-01T10:00:00
    let text = match text.find('T') {
        Some(i) if i == 10 && text[..i].bytes().all(|b| b.is_ascii_digit() || b == b'-') => {
            &text[..i]
        }
        _ => text,
    };
    text.split_whitespace()
        .filter(|tok| !tok.contains(':'))
        .filter(|tok| !tok.eq_ignore_ascii_case("am") && !tok.eq_ignore_ascii_case("pm"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn numeric_date(text: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = text.split(['/', '-', '.']).collect();
    if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }
    let nums: Vec<u32> = parts.iter().map(|p| p.parse().ok()).collect::<Option<_>>()?;

    if parts[0].len() == 4 {
        return NaiveDate::from_ymd_opt(nums[0] as i32, nums[1], nums[2]);
    }
    let year = expand_year(parts[2], nums[2])?;
    NaiveDate::from_ymd_opt(year, nums[1], nums[0])
        .or_else(|| NaiveDate::from_ymd_opt(year, nums[0], nums[1]))
}

fn textual_date(text: &str) -> Option<NaiveDate> {
    let normalized: String = text
        .chars()
        .map(|c| if matches!(c, ',' | '-' | '/' | '.') { ' ' } else { c })
        .collect();
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    if tokens.len() != 3 {
        return None;
    }

    let month_at = tokens.iter().position(|t| t.parse::<Month>().is_ok())?;
    let month = tokens[month_at].parse::<Month>().ok()?.number_from_month();
    let rest: Vec<&str> = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != month_at)
        .map(|(_, t)| *t)
        .collect();

    // "2024 Feb 01" puts the year first; otherwise day then year.
    let (day_tok, year_tok) = if rest[0].len() == 4 {
        (rest[1], rest[0])
    } else {
        (rest[0], rest[1])
    };
    let day: u32 = day_tok.parse().ok()?;
    let year = expand_year(year_tok, year_tok.parse().ok()?)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Two-digit years pivot at 70, as `%y` does.
fn expand_year(token: &str, value: u32) -> Option<i32> {
    match token.len() {
        1 | 2 if value < 70 => Some(2000 + value as i32),
        1 | 2 => Some(1900 + value as i32),
        4 => Some(value as i32),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_thousands_separator_is_stripped() {
        assert_eq!(parse_number(Some("1,250.50")), Some(1250.50));
        assert_eq!(parse_number(Some("  12,000 ")), Some(12000.0));
    }

    #[test]
    fn test_garbage_number_is_null() {
        assert_eq!(parse_number(Some("abc")), None);
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("nan")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_integer_accepts_whole_decimals() {
        assert_eq!(parse_integer(Some("42")), Some(42));
        assert_eq!(parse_integer(Some("3.0")), Some(3));
        assert_eq!(parse_integer(Some("1,001")), Some(1001));
        assert_eq!(parse_integer(Some("1.5")), None);
        assert_eq!(parse_integer(Some("TOTAL")), None);
    }

    #[test]
    fn test_day_first_numeric_dates() {
        assert_eq!(parse_day_first_date(Some("01/02/2024")), ymd(2024, 2, 1));
        assert_eq!(parse_day_first_date(Some("01-02-24")), ymd(2024, 2, 1));
        assert_eq!(parse_day_first_date(Some("31.12.1999")), ymd(1999, 12, 31));
        assert_eq!(parse_day_first_date(Some("2024-02-01")), ymd(2024, 2, 1));
    }

    #[test]
    fn test_impossible_day_first_falls_back_to_month_first() {
        assert_eq!(parse_day_first_date(Some("02/13/2024")), ymd(2024, 2, 13));
        assert_eq!(parse_day_first_date(Some("32/13/2024")), None);
    }

    #[test]
    fn test_textual_dates() {
        assert_eq!(parse_day_first_date(Some("1 Feb 2024")), ymd(2024, 2, 1));
        assert_eq!(parse_day_first_date(Some("05-Mar-23")), ymd(2023, 3, 5));
        assert_eq!(parse_day_first_date(Some("February 1, 2024")), ymd(2024, 2, 1));
    }

    #[test]
    fn test_time_of_day_is_dropped() {
        assert_eq!(parse_day_first_date(Some("01/02/2024 10:15:00")), ymd(2024, 2, 1));
        assert_eq!(parse_day_first_date(Some("2024-02-01T23:59:59")), ymd(2024, 2, 1));
    }

    #[test]
    fn test_unparseable_dates_are_null() {
        assert_eq!(parse_day_first_date(Some("Value Date")), None);
        assert_eq!(parse_day_first_date(Some("  ")), None);
        assert_eq!(parse_day_first_date(None), None);
    }

    #[test]
    fn test_stats_count_only_non_blank_failures() {
        let mut stats = CoercionStats::default();
        stats.number(Some("abc"));
        stats.number(Some(" "));
        stats.number(None);
        stats.date(Some("soon"));
        stats.integer(Some("7"));
        assert_eq!(stats.numeric_failures, 1);
        assert_eq!(stats.date_failures, 1);
        assert_eq!(stats.total(), 2);
    }
}
