//! The date parsing policy for uploaded sales records.
//!
//! Dates arrive as free text from user CSV files and are stored verbatim. They
//! are read with the following rules, in order:
//!
//! 1. A value starting with a four-digit year is read as ISO (`2024-02-03`,
//!    `2024/02/03`, or an ISO date-time whose time part is discarded).
//! 2. Anything else is read day-first (`03/02/2024`, `03-02-2024`,
//!    `03.02.2024`, `03/02/24`, `3 Feb 2024`, `03/02/2024 10:30`).
//! 3. When a four-digit-year value cannot be read day-first, it is read
//!    month-first (`12/31/2024`) as a last resort.
//!
//! A value that matches none of these is treated as missing. Callers drop
//! such records instead of failing.

use chrono::{NaiveDate, NaiveDateTime};

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d %b %Y", "%d %B %Y"];
const DAY_FIRST_SHORT_YEAR_FORMATS: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];
const DAY_FIRST_DATETIME_FORMATS: &[&str] = &["%d/%m/%Y %H:%M:%S", "%d/%m/%Y %H:%M"];
const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y"];

/// Parses a raw sales date under the policy described in the module docs.
pub fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if leading_digits(raw) == 4 {
        return parse_with(raw, ISO_DATE_FORMATS)
            .or_else(|| parse_datetime_with(raw, ISO_DATETIME_FORMATS));
    }

    let trailing = trailing_digits(raw);
    let day_first = if trailing == 2 {
        DAY_FIRST_SHORT_YEAR_FORMATS
    } else {
        DAY_FIRST_FORMATS
    };

    parse_with(raw, day_first)
        .or_else(|| parse_datetime_with(raw, DAY_FIRST_DATETIME_FORMATS))
        .or_else(|| {
            if trailing == 4 {
                parse_with(raw, MONTH_FIRST_FORMATS)
            } else {
                None
            }
        })
}

fn parse_with(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn parse_datetime_with(raw: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

fn leading_digits(raw: &str) -> usize {
    raw.chars().take_while(|c| c.is_ascii_digit()).count()
}

fn trailing_digits(raw: &str) -> usize {
    raw.chars().rev().take_while(|c| c.is_ascii_digit()).count()
}
