// File: src/model/parser.rs
use crate::error::CommandError;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `yyyy-MM-dd` date.
///
/// chrono alone would also take `2024-5-1` or a signed year, so the shape is
/// checked first: ten characters, digits everywhere except hyphens at 4 and 7.
pub fn parse_date(text: &str) -> Result<NaiveDate, CommandError> {
    let bytes = text.as_bytes();
    let well_shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_shaped {
        return Err(CommandError::DateFormat(text.to_string()));
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| CommandError::DateFormat(text.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Splits a command line on single spaces into at most `limit` parts.
///
/// The last part keeps whatever is left, spaces included. Consecutive
/// spaces produce empty parts, and a trailing space produces an empty
/// last part, so `"todo "` is a verb followed by an empty description.
pub fn split_args(input: &str, limit: usize) -> Vec<&str> {
    input.splitn(limit, ' ').collect()
}

/// Parses a 1-based task number as typed by the user.
pub fn parse_index(text: &str) -> Result<i64, CommandError> {
    text.parse::<i64>()
        .map_err(|_| CommandError::InputFormat("That was not understood. Silly."))
}
