//! Lenient number parsing for form fields and data attributes, and the
//! whole-dollar currency format the calculator displays.

use crate::error::SiteError;

/// Leading integer of `raw`, ignoring whatever trails it (`"12.7"` is 12).
/// Values past the `i64` range saturate.
pub fn parse_int(raw: &str) -> Result<i64, SiteError> {
    let text = raw.trim_start();
    let sign_len = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign_len..]
        .bytes()
        .take_while(u8::is_ascii_digit)
        .count();
    if digits == 0 {
        return Err(SiteError::InvalidNumericInput(raw.to_string()));
    }
    let leading = &text[..sign_len + digits];
    // only overflow can fail here; saturate the way a huge count would read
    Ok(leading.parse().unwrap_or(if leading.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

/// Leading decimal number of `raw`, ignoring whatever trails it (`"250abc"` is 250).
pub fn parse_float(raw: &str) -> Result<f64, SiteError> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |start: usize| {
        bytes[start.min(bytes.len())..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(text.starts_with(['+', '-']));
    let whole = digits_from(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole > 0 || fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole == 0 && fraction == 0 {
        return Err(SiteError::InvalidNumericInput(raw.to_string()));
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SiteError::InvalidNumericInput(raw.to_string()))
}

/// Whole US dollars with thousands separators: `4330.2` becomes `$4,330`.
/// Halves round away from zero; anything that isn't finite shows as `$0`.
pub fn format_usd(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
