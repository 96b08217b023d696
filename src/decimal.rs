//! Positional rendering of decimal fractions (tag 4).

use alloc::string::String;

/// Appends the textual rendering of `mantissa * 10^exponent` to `out`.
///
/// `mantissa` is a plain decimal digit string with an optional leading
/// minus. The point is placed positionally: a non-negative exponent
/// appends zeros, a negative one inserts the point `|exponent|` digits
/// from the right, zero-padding on the left as needed. No trailing-zero
/// elision, no exponent form.
pub(crate) fn render_decimal_fraction(exponent: i64, mantissa: &str, out: &mut String) {
    let (sign, digits) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };

    out.push_str(sign);

    if exponent >= 0 {
        out.push_str(digits);
        for _ in 0..exponent {
            out.push('0');
        }
        return;
    }

    let scale = usize::try_from(exponent.unsigned_abs()).unwrap_or(usize::MAX);
    if digits.len() > scale {
        let split = digits.len() - scale;
        out.push_str(&digits[..split]);
        out.push('.');
        out.push_str(&digits[split..]);
    } else {
        out.push_str("0.");
        for _ in 0..scale - digits.len() {
            out.push('0');
        }
        out.push_str(digits);
    }
}
