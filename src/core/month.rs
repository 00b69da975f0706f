//! Conversions between `YYYY-MM` (month picker form) and `MM/YYYY` (stored form)

use chrono::NaiveDate;

/// `"2024-12"` to `"12/2024"`. Malformed input yields an empty string.
pub fn format_month_year(value: &str) -> String {
    match split_month(value, '-', MonthOrder::YearFirst) {
        Some((year, month)) => format!("{month:02}/{year:04}"),
        None => String::new(),
    }
}

/// `"12/2024"` to `"2024-12"`. Malformed input yields an empty string.
pub fn parse_month_year(value: &str) -> String {
    match split_month(value, '/', MonthOrder::MonthFirst) {
        Some((year, month)) => format!("{year:04}-{month:02}"),
        None => String::new(),
    }
}

/// Accept either form and return the stored `MM/YYYY` form
pub fn normalize_due_date(value: &str) -> Option<String> {
    let value = value.trim();
    if split_month(value, '/', MonthOrder::MonthFirst).is_some() {
        return Some(format_month_year(&parse_month_year(value)));
    }
    Some(format_month_year(value)).filter(|s| !s.is_empty())
}

enum MonthOrder {
    YearFirst,
    MonthFirst,
}

fn split_month(value: &str, separator: char, order: MonthOrder) -> Option<(i32, u32)> {
    let (first, second) = value.trim().split_once(separator)?;
    let (year, month) = match order {
        MonthOrder::YearFirst => (first, second),
        MonthOrder::MonthFirst => (second, first),
    };
    if year.len() != 4 || !(1..=2).contains(&month.len()) {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1).map(|_| (year, month))
}
