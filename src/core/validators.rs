//! Token validators
//!
//! Pure predicates for the two free-form slots of the grammar: account
//! identifiers and execution dates.

use chrono::NaiveDate;

/// Whether `id` is a valid account identifier
///
/// Non-empty, and made only of ASCII letters, ASCII digits, `-`, `.` and `@`.
pub fn is_valid_account_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'@'))
}

/// Parse a strict `YYYY-MM-DD` execution date
///
/// Returns `None` unless the string is exactly ten characters with `-` at
/// positions 4 and 7, all other characters are digits, the year is in
/// 1000..=9999, the month in 1..=12, the day in 1..=31, and the triple is a
/// real calendar date.
pub fn parse_execution_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let year: i32 = parse_digits(&value[0..4])?;
    let month: u32 = parse_digits(&value[5..7])?;
    let day: u32 = parse_digits(&value[8..10])?;

    if !(1000..=9999).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Whether `value` is a strict `YYYY-MM-DD` calendar date
pub fn is_valid_date(value: &str) -> bool {
    parse_execution_date(value).is_some()
}

fn parse_digits<T: std::str::FromStr>(part: &str) -> Option<T> {
    if part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().ok()
    } else {
        None
    }
}
