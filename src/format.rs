//! Amount formatting by asset class
//!
//! Fiat amounts show bounded, conventionally grouped precision; small
//! crypto amounts keep enough decimals to stay meaningful. Grouping and
//! trailing-zero stripping are hand-rolled so the output never depends
//! on locale.

use crate::types::AssetClass;

/// Render a converted amount or rate for display.
///
/// Fiat: two decimals grouped for values >= 1, four decimals grouped
/// down to 0.01, eight decimals ungrouped below that. Crypto: six
/// decimals for values >= 1, ten below 1, trailing zeros (and a bare
/// trailing point) stripped in both cases.
pub fn format_amount(value: f64, class: AssetClass) -> String {
    match class {
        AssetClass::Fiat => {
            if value >= 1.0 {
                group_thousands(&format!("{:.2}", value))
            } else if value >= 0.01 {
                group_thousands(&format!("{:.4}", value))
            } else {
                format!("{:.8}", value)
            }
        }
        AssetClass::Crypto => {
            if value >= 1.0 {
                strip_trailing_zeros(&format!("{:.6}", value))
            } else {
                strip_trailing_zeros(&format!("{:.10}", value))
            }
        }
    }
}

/// Insert comma separators into the integer part of a fixed-point
/// decimal string.
fn group_thousands(s: &str) -> String {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(s.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

/// Drop trailing zeros after the decimal point, and the point itself
/// if nothing remains behind it.
fn strip_trailing_zeros(s: &str) -> String {
    if !s.contains('.') {
        return s.to_string();
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_large_two_decimals_grouped() {
        assert_eq!(format_amount(130000.0, AssetClass::Fiat), "130,000.00");
        assert_eq!(format_amount(65000.0, AssetClass::Fiat), "65,000.00");
        assert_eq!(format_amount(1234567.891, AssetClass::Fiat), "1,234,567.89");
        assert_eq!(format_amount(1.0, AssetClass::Fiat), "1.00");
    }

    #[test]
    fn test_fiat_small_four_decimals() {
        assert_eq!(format_amount(0.999999, AssetClass::Fiat), "1.0000");
        assert_eq!(format_amount(0.5, AssetClass::Fiat), "0.5000");
        assert_eq!(format_amount(0.01, AssetClass::Fiat), "0.0100");
    }

    #[test]
    fn test_fiat_tiny_eight_decimals_ungrouped() {
        assert_eq!(format_amount(0.00000001, AssetClass::Fiat), "0.00000001");
        assert_eq!(format_amount(0.0099, AssetClass::Fiat), "0.00990000");
    }

    #[test]
    fn test_crypto_strips_trailing_zeros() {
        assert_eq!(format_amount(1.5, AssetClass::Crypto), "1.5");
        assert_eq!(format_amount(1.500000, AssetClass::Crypto), "1.5");
        assert_eq!(format_amount(0.1, AssetClass::Crypto), "0.1");
        assert_eq!(format_amount(2.0, AssetClass::Crypto), "2");
        assert_eq!(format_amount(20.0, AssetClass::Crypto), "20");
    }

    #[test]
    fn test_crypto_precision_tiers() {
        assert_eq!(format_amount(1.123456789, AssetClass::Crypto), "1.123457");
        assert_eq!(format_amount(0.1234567891234, AssetClass::Crypto), "0.1234567891");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(group_thousands("100"), "100");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("999999.99"), "999,999.99");
        assert_eq!(group_thousands("1000000.00"), "1,000,000.00");
    }
}
