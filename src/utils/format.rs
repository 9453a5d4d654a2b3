//! Formatting utilities for balances, addresses and timestamps.

/// Fractional digits shown for native-currency balances.
const BALANCE_DIGITS: u32 = 4;

/// Parse a `0x`-prefixed hex quantity as returned by JSON-RPC.
///
/// Accepts `"0x0"` through 32-byte values; anything larger than `u128`
/// is rejected rather than silently truncated.
pub fn parse_hex_quantity(raw: &str) -> Option<u128> {
    let digits = raw.trim().strip_prefix("0x").or_else(|| raw.trim().strip_prefix("0X"))?;
    if digits.is_empty() {
        return None;
    }
    u128::from_str_radix(digits, 16).ok()
}

/// Convert a smallest-unit integer amount to a decimal display string
/// with exactly [`BALANCE_DIGITS`] fractional digits.
///
/// Rounds half-up at the last shown digit using integer math only, so
/// 18-decimal amounts never pass through `f64`.
pub fn format_units(value: u128, decimals: u32) -> String {
    let (whole, frac) = if decimals > BALANCE_DIGITS {
        let round_unit = 10u128.pow(decimals - BALANCE_DIGITS);
        let scaled = (value + round_unit / 2) / round_unit;
        let base = 10u128.pow(BALANCE_DIGITS);
        (scaled / base, scaled % base)
    } else {
        let scaled = value * 10u128.pow(BALANCE_DIGITS - decimals);
        let base = 10u128.pow(BALANCE_DIGITS);
        (scaled / base, scaled % base)
    };
    format!("{whole}.{frac:04}")
}

/// Parse and format a hex balance in one step.
pub fn format_hex_units(raw: &str, decimals: u32) -> Option<String> {
    Some(format_units(parse_hex_quantity(raw)?, decimals))
}

/// Shorten an address for display, e.g. `0x1234...abcd`.
///
/// Anything too short to shorten is returned unchanged.
pub fn short_address(address: &str) -> String {
    const HEAD: usize = 6;
    const TAIL: usize = 4;
    if address.len() > HEAD + TAIL + 3 {
        format!("{}...{}", &address[..HEAD], &address[address.len() - TAIL..])
    } else {
        address.to_string()
    }
}

/// Insert thousands separators into the integer part of a decimal string.
pub fn group_thousands(amount: &str) -> String {
    let (int_part, frac_part) = match amount.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (amount, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 && ch.is_ascii_digit() {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

/// Whether a user-typed amount is a positive decimal number.
///
/// Accepts digits with at most one dot; rejects empty, signs, exponents
/// and all-zero amounts.
pub fn is_valid_amount(input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.matches('.').count() > 1 {
        return false;
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return false;
    }
    trimmed.chars().any(|c| c.is_ascii_digit() && c != '0')
}

// =============================================================================
// Timestamps
// =============================================================================

/// Human age of a Unix timestamp relative to `now`, e.g. `"3h ago"`.
///
/// Falls back to an ISO date beyond a week.
pub fn relative_age(timestamp: u64, now: u64) -> String {
    let elapsed = now.saturating_sub(timestamp);
    match elapsed {
        0..=59 => "just now".to_string(),
        60..=3_599 => format!("{}m ago", elapsed / 60),
        3_600..=86_399 => format!("{}h ago", elapsed / 3_600),
        86_400..=604_799 => format!("{}d ago", elapsed / 86_400),
        _ => date_iso(timestamp),
    }
}

/// Unix timestamp as `YYYY-MM-DD`.
pub fn date_iso(timestamp: u64) -> String {
    let (year, month, day) = civil_from_days((timestamp / 86_400) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Days-since-epoch to civil date (proleptic Gregorian).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let year = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if month <= 2 { year + 1 } else { year }, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_units_four_digits() {
        assert_eq!(format_units(1_234_500_000_000_000_000, 18), "1.2345");
        assert_eq!(format_units(0, 18), "0.0000");
        assert_eq!(format_units(1, 18), "0.0000");
    }

    #[test]
    fn test_format_units_rounds_half_up() {
        // 1.00005 rounds up at the 4th digit
        assert_eq!(format_units(1_000_050_000_000_000_000, 18), "1.0001");
        // 0.999999999999999999 carries into the integer part
        assert_eq!(format_units(999_999_999_999_999_999, 18), "1.0000");
    }

    #[test]
    fn test_format_units_small_decimals() {
        assert_eq!(format_units(12_345, 2), "123.4500");
        assert_eq!(format_units(7, 0), "7.0000");
    }

    #[test]
    fn test_parse_hex_quantity() {
        assert_eq!(parse_hex_quantity("0x0"), Some(0));
        assert_eq!(parse_hex_quantity("0xde0b6b3a7640000"), Some(1_000_000_000_000_000_000));
        assert_eq!(parse_hex_quantity("0x"), None);
        assert_eq!(parse_hex_quantity("38"), None);
    }

    #[test]
    fn test_format_hex_units() {
        assert_eq!(format_hex_units("0xde0b6b3a7640000", 18).as_deref(), Some("1.0000"));
        assert_eq!(format_hex_units("not hex", 18), None);
    }

    #[test]
    fn test_short_address() {
        let addr = "0x1234567890abcdef1234567890abcdef12345678";
        assert_eq!(short_address(addr), "0x1234...5678");
        assert_eq!(short_address("0xabc"), "0xabc");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567"), "1,234,567");
        assert_eq!(group_thousands("1234.5678"), "1,234.5678");
        assert_eq!(group_thousands("999"), "999");
    }

    #[test]
    fn test_is_valid_amount() {
        assert!(is_valid_amount("1.5"));
        assert!(is_valid_amount("0.0001"));
        assert!(!is_valid_amount(""));
        assert!(!is_valid_amount("0.000"));
        assert!(!is_valid_amount("-1"));
        assert!(!is_valid_amount("1.2.3"));
        assert!(!is_valid_amount("1e18"));
    }

    #[test]
    fn test_relative_age() {
        let now = 1_700_000_000;
        assert_eq!(relative_age(now - 10, now), "just now");
        assert_eq!(relative_age(now - 300, now), "5m ago");
        assert_eq!(relative_age(now - 7_200, now), "2h ago");
        assert_eq!(relative_age(now - 172_800, now), "2d ago");
    }

    #[test]
    fn test_date_iso() {
        assert_eq!(date_iso(0), "1970-01-01");
        assert_eq!(date_iso(1_704_067_200), "2024-01-01");
    }
}
