//! Server-side HTML views.
//!
//! Every view is a plain function building markup with `format!`. Dynamic
//! text goes through [`escape_html`] before it is interpolated.

mod admin;
mod auth;
mod catalog;
mod home;
mod layout;

pub use admin::{dashboard_page, users_page};
pub use auth::{login_page, register_page};
pub use catalog::{catalog_page, lot_page, CatalogView};
pub use home::home_page;
pub use layout::layout;

/// Escape text for use in HTML content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Amount with thousands separators and two decimals
pub(crate) fn money(amount: f64) -> String {
    let rounded = format!("{:.2}", amount.abs());
    let (whole, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Стальные трубы"), "Стальные трубы");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(50_000.0), "50 000.00");
        assert_eq!(money(1234567.891), "1 234 567.89");
        assert_eq!(money(-30.5), "-30.50");
        assert_eq!(money(0.0), "0.00");
    }
}
