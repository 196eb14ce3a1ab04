//! Currency normalization for the `Amount` column.

use std::borrow::Cow;

/// Currency symbol stripped from the front of amounts.
pub const CURRENCY_SYMBOL: char = '$';

/// Coerce a currency-formatted amount to a number.
///
/// Returns `None` (a missing amount) rather than an error when the text is not
/// a finite decimal after the currency symbol is removed. Grouping commas are
/// accepted only in well-formed positions (`5,320.00`, not `53,20`).
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let s = s.strip_prefix(CURRENCY_SYMBOL).unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }

    let digits = strip_grouping(s)?;
    let value = digits.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

fn strip_grouping(s: &str) -> Option<Cow<'_, str>> {
    if !s.contains(',') {
        return Some(Cow::Borrowed(s));
    }

    let body = s.strip_prefix('-').unwrap_or(s);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    if frac_part.is_some_and(|f| f.contains(',')) {
        return None;
    }

    let mut groups = int_part.split(',');
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 || !lead.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !groups.all(|g| g.len() == 3 && g.bytes().all(|b| b.is_ascii_digit())) {
        return None;
    }

    Some(Cow::Owned(s.replace(',', "")))
}
