//! Display formatting for yen amounts and percentages

/// Whole-yen amount with thousands separators: `￥150,000`
pub fn format_yen(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("￥{grouped}")
}

/// One decimal place with a percent sign: `7.1%`, `-50.0%`
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}
