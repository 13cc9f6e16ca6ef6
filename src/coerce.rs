//! Typed value coercion for located text fragments.
//!
//! Every coercion returns `Option`: malformed input yields `None`, never
//! a fabricated value, and never an error that could cross the per-field
//! boundary.

use chrono::NaiveDate;

use crate::error::Miss;
use crate::patterns::WHITESPACE;

/// Parse an integer out of noisy text by keeping only its digits.
///
/// `"123,456 votes"` parses as `123456`; text with no digits is absent.
#[must_use]
pub fn int_from_digits(text: &str) -> Option<u32> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Parse a float from the text before the first `/`.
///
/// Ratings render as `"7.4/10"`; text without a slash is parsed whole.
#[must_use]
pub fn float_before_slash(text: &str) -> Option<f32> {
    text.split('/').next()?.trim().parse().ok()
}

/// Parse a four-digit year.
#[must_use]
pub fn year(text: &str) -> Option<i32> {
    let trimmed = text.trim();
    if trimmed.len() == 4 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    }
}

/// Join a day-month fragment and a year fragment into a calendar date.
///
/// The two fragments come from separate selector queries against
/// possibly different nodes; either being empty makes the date absent.
/// `"12 March"` + `"1985"` yields 1985-03-12.
#[must_use]
pub fn date_from_parts(day_month: &str, year: &str) -> Option<NaiveDate> {
    let day_month = day_month.trim();
    let year = year.trim();
    if day_month.is_empty() || year.is_empty() {
        return None;
    }
    date_from_text(&format!("{day_month} {year}"))
}

/// Parse a full date out of free text, trying the formats the site uses.
#[must_use]
pub fn date_from_text(text: &str) -> Option<NaiveDate> {
    let normalized = WHITESPACE.replace_all(text.trim(), " ");
    const FORMATS: &[&str] = &["%d %B %Y", "%B %d %Y", "%d %b %Y", "%b %d %Y", "%Y-%m-%d"];
    let parsed = FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(&normalized, fmt).ok());
    if parsed.is_none() {
        tracing::trace!(text = %normalized, miss = ?Miss::Coercion, "unparsable date");
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_ignores_separators_and_suffixes() {
        assert_eq!(int_from_digits("123,456 votes"), Some(123_456));
        assert_eq!(int_from_digits("42"), Some(42));
        assert_eq!(int_from_digits("no digits"), None);
        assert_eq!(int_from_digits(""), None);
    }

    #[test]
    fn rating_takes_text_before_slash() {
        assert_eq!(float_before_slash("7.4/10"), Some(7.4));
        assert_eq!(float_before_slash("8.0"), Some(8.0));
        assert_eq!(float_before_slash("N/A"), None);
        assert_eq!(float_before_slash("not a number"), None);
    }

    #[test]
    fn date_joins_two_fragments() {
        let date = date_from_parts("12 March", "1985");
        assert_eq!(date, NaiveDate::from_ymd_opt(1985, 3, 12));
    }

    #[test]
    fn date_absent_on_unparsable_fragments() {
        assert_eq!(date_from_parts("", "1985"), None);
        assert_eq!(date_from_parts("12 March", ""), None);
        assert_eq!(date_from_parts("sometime", "soon"), None);
    }

    #[test]
    fn date_from_text_handles_site_formats() {
        assert_eq!(
            date_from_text("14 October 1994"),
            NaiveDate::from_ymd_opt(1994, 10, 14)
        );
        assert_eq!(
            date_from_text("October 14 1994"),
            NaiveDate::from_ymd_opt(1994, 10, 14)
        );
        assert_eq!(date_from_text(""), None);
    }

    #[test]
    fn year_requires_four_digits() {
        assert_eq!(year("1988"), Some(1988));
        assert_eq!(year(" 2001 "), Some(2001));
        assert_eq!(year("88"), None);
        assert_eq!(year("MCMLXXXVIII"), None);
    }
}
