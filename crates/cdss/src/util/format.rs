/// Format an accuracy value in percent with one decimal
pub fn format_accuracy(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a duration in seconds with two decimals
pub fn format_seconds(value: f64) -> String {
    format!("{value:.2}s")
}

/// Format a count with thousands separators
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut result = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}
