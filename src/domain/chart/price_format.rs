/// Significant digits kept in axis and input labels.
pub const LABEL_SIGNIFICANT_DIGITS: i32 = 5;

/// Format a displayed price for an axis or input label.
///
/// - `0` and `∞` for prices pinned at a limit
/// - exponent notation outside `[1e-6, 1e9)`
/// - otherwise `LABEL_SIGNIFICANT_DIGITS` significant digits, trailing zeros trimmed
pub fn format_price_label(price: f64) -> String {
    if price.is_nan() {
        return "-".to_string();
    }
    if price == 0.0 {
        return "0".to_string();
    }
    if price.is_infinite() {
        return if price > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let magnitude = price.abs();
    if !(1e-6..1e9).contains(&magnitude) {
        return format!("{:.3e}", price);
    }

    let integer_digits = magnitude.log10().floor() as i32 + 1;
    let decimals = (LABEL_SIGNIFICANT_DIGITS - integer_digits).max(0) as usize;
    trim_zeros(format!("{:.*}", decimals, price))
}

fn trim_zeros(text: String) -> String {
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
