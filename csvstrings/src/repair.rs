//! Normalization applied to every CSV cell before it is written to a
//! `.strings` file.
//!
//! Spreadsheet tools mangle format strings in predictable ways: raw quotes,
//! hard line breaks, and spaces glued after `%`. [`repair_value`] undoes
//! those in a fixed order:
//!
//! 1. escape double quotes (`"` → `\"`; an existing escape is kept as-is),
//! 2. collapse newlines and `\n` tokens, with surrounding whitespace, to `\n`,
//! 3. drop whitespace between `%` and a format letter (`% d` → `%d`),
//! 4. put a space before a `%` glued to preceding text (`abc%d` → `abc %d`),
//! 5. trim.
//!
//! The result is stable: repairing an already repaired value is a no-op.

use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref QUOTE_REGEX: Regex = Regex::new(r#"\\*""#).unwrap();
    static ref NEWLINE_REGEX: Regex = Regex::new(r"\s*(?:\n|\\\s*n)\s*").unwrap();
    static ref FORMAT_SPACE_REGEX: Regex = Regex::new(r"%\s+([a-zA-Z@])([^a-zA-Z@]|$)").unwrap();
    static ref GLUED_PERCENT_REGEX: Regex = Regex::new(r"([^0-9\s(\{\[\^%])%").unwrap();
}

/// Escapes every double quote, folding any backslashes right before it into
/// a single escape.
pub fn escape_quotes(value: &str) -> Cow<'_, str> {
    QUOTE_REGEX.replace_all(value, r#"\""#)
}

/// Replaces hard line breaks and literal `\n` sequences, including the
/// whitespace around them, with a single `\n` token.
pub fn collapse_newlines(value: &str) -> Cow<'_, str> {
    NEWLINE_REGEX.replace_all(value, r"\n")
}

/// Removes whitespace inserted between `%` and its conversion character.
pub fn repair_format_spacing(value: &str) -> String {
    let mut repaired = value.to_string();
    // The character after the specifier is part of each match, so `% a% b`
    // only gets its second specifier on the next pass.
    loop {
        let next = FORMAT_SPACE_REGEX
            .replace_all(&repaired, "%${1}${2}")
            .into_owned();
        if next == repaired {
            return repaired;
        }
        repaired = next;
    }
}

/// Separates a `%` from the text it is glued to. Digits, whitespace, opening
/// brackets, `^` and another `%` are left alone.
pub fn separate_glued_percent(value: &str) -> Cow<'_, str> {
    GLUED_PERCENT_REGEX.replace_all(value, "${1} %")
}

/// Applies all repair steps, in order, and trims the result.
pub fn repair_value(value: &str) -> String {
    let value = escape_quotes(value);
    let value = collapse_newlines(&value);
    let value = repair_format_spacing(&value);
    let value = separate_glued_percent(&value);
    value.trim().to_string()
}
