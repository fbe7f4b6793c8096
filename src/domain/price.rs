//! Parsing of scraped price strings.

use once_cell::sync::Lazy;
use regex::Regex;

static PRICE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d+)?$").unwrap());

/// Parse a price such as `"¥5,000"` or `"12 499.90 ₸"`.
///
/// Everything except ASCII digits and `.` is dropped, so commas act as
/// thousands separators. Returns `None` when what remains is not a plain
/// decimal number.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if !PRICE_SHAPE.is_match(&cleaned) {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_and_separators() {
        assert_eq!(parse_price("¥5,000"), Some(5000.0));
        assert_eq!(parse_price("12 499.90 ₸"), Some(12499.9));
        assert_eq!(parse_price("1\u{a0}250 ₽"), Some(1250.0));
        assert_eq!(parse_price("350"), Some(350.0));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("по запросу"), None);
        assert_eq!(parse_price("1.2.3"), None);
        assert_eq!(parse_price(".5"), None);
    }
}
