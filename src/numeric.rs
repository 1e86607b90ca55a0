//! Lenient number handling for values read out of form fields and markup.
//!
//! Form values arrive as free text. These helpers read the leading number
//! the way the browser's `parseInt` / `parseFloat` do, so `"10 pages"`
//! reads as 10 and `"abc"` reads as nothing rather than failing.

/// Reads a leading base-10 integer, ignoring leading whitespace and any
/// trailing garbage. Returns `None` when no digit is found.
///
/// Values too large for `i64` saturate.
///
/// ```ignore
/// assert_eq!(parse_int_prefix("  42px"), Some(42));
/// assert_eq!(parse_int_prefix("3.9"), Some(3));
/// assert_eq!(parse_int_prefix("abc"), None);
/// ```
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Reads a leading decimal number (optional sign, fraction and exponent),
/// ignoring leading whitespace and trailing garbage.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    let negative = bytes.first() == Some(&b'-');
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if s[end..].starts_with("Infinity") {
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // exponent only counts when it carries digits
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Formats a value with exactly two decimals, like `Number.prototype.toFixed(2)`.
///
/// The stored binary value is rounded, not its scaled copy: 2.675 is really
/// 2.67499.. and prints as `2.67`. A value sitting exactly halfway between
/// two cents (only possible for multiples of 1/8, e.g. 0.125) rounds away
/// from zero.
pub fn to_fixed_2(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }
    if value == 0.0 {
        return "0.00".into();
    }
    // value * 8 and value * 100 are exact for multiples of 1/8
    let scaled = value * 100.0;
    if (value * 8.0).fract() == 0.0 && scaled.fract().abs() == 0.5 {
        return format!("{:.2}", scaled.round() / 100.0);
    }
    format!("{:.2}", value)
}
