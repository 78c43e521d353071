//! Lenient numeric parsing and fixed-decimal display for measurement values.
//!
//! NVDB and hand-typed inputs carry numbers as text with Norwegian
//! formatting: `"4,2"`, `" 12 5,0 "`.  The rule is: trim, drop every
//! whitespace character, replace the first decimal comma with a point,
//! parse.  Anything that does not end up finite is rejected.

use crate::{AttrValue, CoreError, CoreResult};

/// Parse `text` under the measurement rule above.
///
/// # Errors
///
/// [`CoreError::Parse`] for empty, unparseable, or non-finite input.
pub fn parse_number(text: &str) -> CoreResult<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(CoreError::Parse("empty numeric value".into()));
    }
    let normalized = compact.replacen(',', ".", 1);
    let value: f64 = normalized
        .parse()
        .map_err(|_| CoreError::Parse(format!("not a number: {text:?}")))?;
    if !value.is_finite() {
        return Err(CoreError::Parse(format!("non-finite number: {text:?}")));
    }
    Ok(value)
}

/// [`parse_number`] as an `Option`.
#[inline]
pub fn normalize_str(text: &str) -> Option<f64> {
    parse_number(text).ok()
}

/// Normalise an attribute value to a finite `f64`.
///
/// Numbers pass through when finite, text goes through [`parse_number`],
/// `Null` and booleans yield `None`.
pub fn normalize_number(value: &AttrValue) -> Option<f64> {
    match value {
        AttrValue::Number(n) if n.is_finite() => Some(*n),
        AttrValue::Text(s) => normalize_str(s),
        _ => None,
    }
}

/// Format `value` with `decimals` fraction digits, rounding a value that
/// lies exactly halfway away from zero: `2.25` → `"2.3"`, `0.25` → `"0.3"`.
///
/// `format!("{:.N}")` sends exact binary halves to the even digit instead,
/// which would print `"2.2"`.  Everything that is not an exact half goes
/// through `format!` unchanged.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if decimals <= 19 && is_decimal_half(value, decimals) {
        let scale = 10u64.pow(decimals as u32);
        let scaled = value.abs() * scale as f64;
        // Exact: a half below 2^52 is representable and the product is
        // correctly rounded.
        if scaled < 4_503_599_627_370_496.0 {
            let n = scaled.ceil() as u64;
            let sign = if value < 0.0 { "-" } else { "" };
            return if decimals == 0 {
                format!("{sign}{n}")
            } else {
                format!("{sign}{}.{:0width$}", n / scale, n % scale, width = decimals)
            };
        }
    }
    format!("{:.*}", decimals, value)
}

/// `true` iff `value · 10^decimals` is exactly an integer plus one half.
fn is_decimal_half(value: f64, decimals: usize) -> bool {
    if !value.is_finite() || value == 0.0 {
        return false;
    }
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i64;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exp) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };
    // 2 · value · 10^d = mantissa · 5^d · 2^(exp + 1 + d); 5^d is odd, so
    // this is an odd integer iff the power of two cancels exactly.
    i64::from(mantissa.trailing_zeros()) + exp + 1 + decimals as i64 == 0
}
