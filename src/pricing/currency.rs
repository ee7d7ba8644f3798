use crate::rounding::round_to_int;

/// Formats an amount as a whole number of currency units, grouped in
/// thousands with the country's separator (which need not match the host
/// locale) and prefixed with the currency symbol.
///
/// ```
/// use wellness_eval::pricing::currency::format_currency;
/// assert_eq!(format_currency(1234567.0, "$", ','), "$1,234,567");
/// assert_eq!(format_currency(40377.4, "$", '.'), "$40.377");
/// ```
pub fn format_currency(value: f64, symbol: &str, thousands_separator: char) -> String {
    let rounded = round_to_int(value);
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(thousands_separator);
        }
        grouped.push(ch);
    }

    if rounded < 0 {
        format!("{}-{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}
