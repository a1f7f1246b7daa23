//! Numeric token rewriting: leading/trailing zero removal and unit
//! dropping on zero values where the property permits it.

/// Properties whose zero values may drop their unit without changing the
/// computed style.
const UNIT_DROPPABLE: &[&str] = &[
    "background",
    "background-position",
    "background-size",
    "border",
    "border-bottom",
    "border-bottom-width",
    "border-left",
    "border-left-width",
    "border-right",
    "border-right-width",
    "border-spacing",
    "border-top",
    "border-top-width",
    "border-width",
    "bottom",
    "column-gap",
    "column-width",
    "font-size",
    "height",
    "left",
    "letter-spacing",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "outline",
    "outline-width",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "perspective",
    "right",
    "text-indent",
    "top",
    "width",
    "word-spacing",
];

/// Rewrite one token. Non-numeric tokens come back unchanged; numeric
/// tokens keep their sign and unit spelling.
pub fn optimise(property: Option<&str>, token: &str) -> String {
    match parse_numeric(token) {
        Some((sign, mantissa, unit)) => rebuild(property, sign, mantissa, unit),
        None => token.to_string(),
    }
}

/// Split a token into sign, mantissa and unit, or None when the token is
/// not a plain `<number><unit?>` form.
fn parse_numeric(token: &str) -> Option<(&str, &str, &str)> {
    let bytes = token.as_bytes();
    if bytes.is_empty() {
        return None;
    }

    let sign_len = usize::from(bytes[0] == b'+' || bytes[0] == b'-');
    let mut i = sign_len;
    let mut seen_digit = false;
    let mut seen_dot = false;
    while i < bytes.len() {
        match bytes[i] {
            b'0'..=b'9' => {
                seen_digit = true;
                i += 1;
            }
            b'.' if !seen_dot => {
                seen_dot = true;
                i += 1;
            }
            _ => break,
        }
    }
    if !seen_digit {
        return None;
    }

    let unit = &token[i..];
    let unit_ok = unit.is_empty() || unit == "%" || unit.chars().all(|c| c.is_ascii_alphabetic());
    if !unit_ok {
        return None;
    }
    Some((&token[..sign_len], &token[sign_len..i], unit))
}

fn rebuild(property: Option<&str>, sign: &str, mantissa: &str, unit: &str) -> String {
    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    let int_part = int_part.trim_start_matches('0');
    let frac_part = frac_part.trim_end_matches('0');

    if int_part.is_empty() && frac_part.is_empty() {
        let droppable = property
            .map(|p| UNIT_DROPPABLE.contains(&p))
            .unwrap_or(false);
        return if unit.is_empty() || droppable {
            "0".to_string()
        } else {
            format!("0{}", unit)
        };
    }

    let mut out = String::with_capacity(mantissa.len() + unit.len() + 1);
    out.push_str(sign);
    if frac_part.is_empty() {
        out.push_str(int_part);
    } else {
        out.push_str(int_part);
        out.push('.');
        out.push_str(frac_part);
    }
    out.push_str(unit);
    out
}
