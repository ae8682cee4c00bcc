//! # Formatting Utilities
//!
//! Pure number-to-string functions used for prices, holdings and the summary
//! statistics. None of them allocate beyond the returned `String`.
//!
//! - [`format_number`] - Thousands separators with fixed decimals
//! - [`format_currency_2`] - `$1,234.56`
//! - [`format_currency_6`] - `$0.000123`, at least 2 and at most 6 decimals
//! - [`as_number_string`] / [`as_percent_string`] - `12.34` / `12.34%`
//! - [`format_with_abbreviations`] - `2.51Tr`, `98.00Bn`, `12.00M`, `1.50K`
//! - [`format_percentage`] - Signed change, `+1.23%`
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_currency_2, format_with_abbreviations};
//!
//! assert_eq!(format_currency_2(1234.5), "$1,234.50");
//! assert_eq!(format_with_abbreviations(2_510_000_000_000.0), "2.51Tr");
//! ```

/// Format a number with commas (e.g., 1234567.89 -> "1,234,567.89").
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
/// assert_eq!(format_number(-1234.0, 0), "-1,234");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, dec),
        None => (formatted.as_str(), ""),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, ch) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads badly; only keep the sign when something non-zero survives rounding
    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    if decimal_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, decimal_part)
    }
}

/// USD currency with exactly two decimals.
///
/// ```rust
/// use shared::utils::format_currency_2;
///
/// assert_eq!(format_currency_2(200.0), "$200.00");
/// assert_eq!(format_currency_2(-12.5), "-$12.50");
/// ```
pub fn format_currency_2(value: f64) -> String {
    prefix_currency(format_number(value, 2))
}

/// USD currency with two to six decimals (trailing zeros past the second are dropped).
///
/// ```rust
/// use shared::utils::format_currency_6;
///
/// assert_eq!(format_currency_6(1234.56), "$1,234.56");
/// assert_eq!(format_currency_6(0.000123), "$0.000123");
/// ```
pub fn format_currency_6(value: f64) -> String {
    let mut number = format_number(value, 6);
    if let Some(dot) = number.find('.') {
        let min_len = dot + 3;
        while number.len() > min_len && number.ends_with('0') {
            number.pop();
        }
    }
    prefix_currency(number)
}

fn prefix_currency(number: String) -> String {
    match number.strip_prefix('-') {
        Some(abs) => format!("-${}", abs),
        None => format!("${}", number),
    }
}

/// Two decimals, no grouping.
pub fn as_number_string(value: f64) -> String {
    format!("{:.2}", value)
}

/// Two decimals followed by `%`.
pub fn as_percent_string(value: f64) -> String {
    format!("{}%", as_number_string(value))
}

/// Abbreviate large magnitudes with `Tr`, `Bn`, `M` or `K`.
///
/// Values below one thousand are rendered by [`as_number_string`].
///
/// ```rust
/// use shared::utils::format_with_abbreviations;
///
/// assert_eq!(format_with_abbreviations(12_345_678.0), "12.35M");
/// assert_eq!(format_with_abbreviations(-1_500.0), "-1.50K");
/// assert_eq!(format_with_abbreviations(999.0), "999.00");
/// ```
pub fn format_with_abbreviations(value: f64) -> String {
    let num = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    const UNITS: [(f64, &str); 4] = [
        (1_000_000_000_000.0, "Tr"),
        (1_000_000_000.0, "Bn"),
        (1_000_000.0, "M"),
        (1_000.0, "K"),
    ];

    for (scale, suffix) in UNITS {
        if num >= scale {
            return format!("{}{}{}", sign, as_number_string(num / scale), suffix);
        }
    }
    as_number_string(value)
}

/// Format percentage change with an explicit sign.
pub fn format_percentage(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.2}%", pct)
    } else {
        format!("{:.2}%", pct)
    }
}
