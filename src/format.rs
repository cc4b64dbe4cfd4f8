//! Number presentation helpers for the rendered pages

/// Groups digits in threes with commas, en-US style: 1234567 -> "1,234,567".
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Like [`format_number`] for counts that may arrive negative.
pub fn format_count(n: i64) -> String {
    let grouped = format_number(n.unsigned_abs());
    if n < 0 { format!("-{grouped}") } else { grouped }
}

/// Ordinal suffix. Only 1, 2 and 3 get their own suffix; everything else,
/// including 11-13 and 21-23, takes "th".
pub fn format_ordinal(n: u32) -> String {
    let suffix = match n {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

/// Two decimal places, as shown for posts per day.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}")
}
