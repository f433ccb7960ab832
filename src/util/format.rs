//! Money and label formatting for rendered screens.

/// Group the digits of `value` in threes: `1500000` -> `1,500,000`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-naira amount, e.g. `₦200,000` or `-₦5,000`.
pub fn naira(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}₦{}", group_thousands(amount.unsigned_abs()))
}

/// Minor units (kobo) rendered as naira; fractional kobo shown only when present.
pub fn naira_from_kobo(kobo: i64) -> String {
    let sign = if kobo < 0 { "-" } else { "" };
    let abs = kobo.unsigned_abs();
    let (whole, frac) = (abs / 100, abs % 100);
    if frac == 0 {
        format!("{sign}₦{}", group_thousands(whole))
    } else {
        format!("{sign}₦{}.{frac:02}", group_thousands(whole))
    }
}

/// Signed line item for round breakdowns: `+ ₦5,000` / `- ₦1,200`.
pub fn signed_naira(amount: i64) -> String {
    let sign = if amount < 0 { '-' } else { '+' };
    format!("{sign} ₦{}", group_thousands(amount.unsigned_abs()))
}

/// Upper-cased first letter used as an avatar.
pub fn initial(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}
