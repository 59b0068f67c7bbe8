//! Escaping and number formatting for report output.
//!
//! Product names, customers and supplier ids come straight from upstream
//! systems. Everything embedded in HTML goes through [`escape_html`].

/// Escape a string for safe inclusion in HTML content.
///
/// Escapes the following characters:
/// - `&` -> `&amp;`
/// - `<` -> `&lt;`
/// - `>` -> `&gt;`
/// - `"` -> `&quot;`
/// - `'` -> `&#x27;`
///
/// # Examples
///
/// ```
/// use salesops_dash::reports::escape::escape_html;
///
/// assert_eq!(escape_html("<script>alert('xss')</script>"),
///     "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
///
/// assert_eq!(escape_html("Tirzepatide 10mg Kit"), "Tirzepatide 10mg Kit");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a USD amount with thousands separators and cents.
///
/// ```
/// use salesops_dash::reports::escape::format_usd;
///
/// assert_eq!(format_usd(8615.0), "$8,615.00");
/// assert_eq!(format_usd(-1234.5), "-$1,234.50");
/// ```
#[must_use]
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// A 0-1 ratio as a percentage with `decimals` fraction digits.
#[must_use]
pub fn format_pct(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A & B"), "A &amp; B");
        assert_eq!(escape_html("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1_234_567.0), "$1,234,567.00");
        assert_eq!(format_usd(f64::NAN), "$0.00");
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(0.2381, 1), "23.8%");
        assert_eq!(format_pct(0.9, 0), "90%");
    }
}
