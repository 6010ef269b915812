//! Date formatting capability
//!
//! Patterns use the familiar `dd MMMM yyyy` token style and are translated
//! to `chrono` strftime items. Text inside single quotes is literal, and
//! `''` is a literal quote.
//!
//! | Token  | Output            |
//! |--------|-------------------|
//! | `yyyy` | 2024              |
//! | `yy`   | 24                |
//! | `MMMM` | March             |
//! | `MMM`  | Mar               |
//! | `MM`   | 03                |
//! | `M`    | 3                 |
//! | `dd`   | 05                |
//! | `d`    | 5                 |
//! | `EEEE` | Tuesday           |
//! | `EEE`  | Tue               |
//! | `HH`/`H`, `hh`/`h`, `mm`/`m`, `ss`/`s`, `a` | time of day |

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt::Write;

use crate::error::{DateFormatError, DateFormatResult};

pub const DEFAULT_DATE_PATTERN: &str = "dd MMMM yyyy";
pub const DEFAULT_LOCALE: &str = "en";

/// Renders an ISO-8601 date string with a pattern and locale
pub trait DateFormatter {
    fn format_date(&self, iso: &str, pattern: &str, locale: &str) -> DateFormatResult<String>;
}

/// `chrono`-backed formatter with English month and day names
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDateFormatter;

impl DateFormatter for PatternDateFormatter {
    fn format_date(&self, iso: &str, pattern: &str, locale: &str) -> DateFormatResult<String> {
        if !is_english(locale) {
            return Err(DateFormatError::UnsupportedLocale(locale.to_string()));
        }

        let date = parse_iso(iso).ok_or_else(|| DateFormatError::InvalidDate(iso.to_string()))?;
        let strftime = translate_pattern(pattern)?;

        let mut out = String::new();
        write!(out, "{}", date.format(&strftime)).map_err(|_| DateFormatError::UnsupportedPattern {
            pattern: pattern.to_string(),
            token: strftime.clone(),
        })?;
        Ok(out)
    }
}

fn is_english(locale: &str) -> bool {
    let lang = locale.split(|c: char| c == '-' || c == '_').next().unwrap_or_default();
    lang.eq_ignore_ascii_case("en")
}

/// Accepts `YYYY-MM-DD`, RFC 3339 date-times and naive date-times
///
/// Offsets are not normalized: a certificate dated `2024-03-05T23:00:00-05:00`
/// shows March 5th.
pub fn parse_iso(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Translate a token pattern into a strftime string
pub fn translate_pattern(pattern: &str) -> DateFormatResult<String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // '' is an escaped quote, otherwise read until the closing quote
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            while i < chars.len() {
                if chars[i] == '\'' {
                    if chars.get(i + 1) == Some(&'\'') {
                        out.push('\'');
                        i += 2;
                        continue;
                    }
                    break;
                }
                push_literal(&mut out, chars[i]);
                i += 1;
            }
            i += 1;
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let start = i;
        while i < chars.len() && chars[i] == c {
            i += 1;
        }
        let count = i - start;

        let item = match (c, count) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', 2) => "%d",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('H', 1) => "%-H",
            ('H', 2) => "%H",
            ('h', 1) => "%-I",
            ('h', 2) => "%I",
            ('m', 1) => "%-M",
            ('m', 2) => "%M",
            ('s', 1) => "%-S",
            ('s', 2) => "%S",
            ('a', _) => "%p",
            _ => {
                return Err(DateFormatError::UnsupportedPattern {
                    pattern: pattern.to_string(),
                    token: chars[start..i].iter().collect(),
                })
            }
        };
        out.push_str(item);
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
