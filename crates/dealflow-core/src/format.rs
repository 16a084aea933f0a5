//! Compact currency and percentage formatting for display surfaces.

/// Format a whole-unit amount as `$1.5M`, `$250K` or `$900`.
///
/// Millions keep one decimal and thousands none, both rounded half away
/// from zero.
pub fn format_currency(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    if abs >= 1_000_000 {
        let tenths = (abs + 50_000) / 100_000;
        format!("{sign}${}.{}M", tenths / 10, tenths % 10)
    } else if abs >= 1_000 {
        format!("{sign}${}K", (abs + 500) / 1_000)
    } else {
        format!("{sign}${abs}")
    }
}

/// Format a funding ask the way records quote it: `$3M` rather than `$3.0M`.
pub fn format_ask(amount: u64) -> String {
    let amount = i64::try_from(amount).unwrap_or(i64::MAX);
    let text = format_currency(amount);
    match text.strip_suffix(".0M") {
        Some(whole) => format!("{whole}M"),
        None => text,
    }
}

/// Format a percentage, dropping a trailing `.0`.
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}%")
    } else {
        format!("{value}%")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millions() {
        assert_eq!(format_currency(2_500_000), "$2.5M");
        assert_eq!(format_currency(20_000_000), "$20.0M");
        assert_eq!(format_currency(1_250_000), "$1.3M");
        assert_eq!(format_currency(1_000_000), "$1.0M");
    }

    #[test]
    fn test_thousands_and_units() {
        assert_eq!(format_currency(500_000), "$500K");
        assert_eq!(format_currency(50_000), "$50K");
        assert_eq!(format_currency(2_500), "$3K");
        assert_eq!(format_currency(999), "$999");
        assert_eq!(format_currency(0), "$0");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_currency(-1_500_000), "-$1.5M");
        assert_eq!(format_currency(-40_000), "-$40K");
    }

    #[test]
    fn test_ask_drops_trailing_zero() {
        assert_eq!(format_ask(3_000_000), "$3M");
        assert_eq!(format_ask(4_000_000), "$4M");
        assert_eq!(format_ask(2_500_000), "$2.5M");
        assert_eq!(format_ask(20_000_000), "$20M");
        assert_eq!(format_ask(750_000), "$750K");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(12.0), "12%");
        assert_eq!(format_percent(12.5), "12.5%");
    }
}
