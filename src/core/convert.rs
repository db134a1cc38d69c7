//! Conversion computation and display formatting.

use chrono::{DateTime, Utc};

use crate::core::cache::CacheEntry;
use crate::core::error::ConvertError;

/// Outcome of a single conversion attempt.
///
/// `rates_fetched_at` carries the timestamp of the rate table that served
/// this conversion, so the staleness line always reflects the base
/// currency actually used. It is `None` for same-currency conversions,
/// which never touch a rate table.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub converted: f64,
    pub rates_fetched_at: Option<DateTime<Utc>>,
}

impl Conversion {
    /// Same-currency fast path: factor 1, no rate table involved.
    pub fn identity(amount: f64, code: &str) -> Self {
        Self {
            amount,
            from: code.to_string(),
            to: code.to_string(),
            rate: 1.0,
            converted: amount,
            rates_fetched_at: None,
        }
    }

    /// Multiplies `amount` by the target's factor from `entry`.
    /// Plain f64 arithmetic; the result is never rounded before display.
    pub fn compute(
        amount: f64,
        from: &str,
        to: &str,
        entry: &CacheEntry,
    ) -> Result<Self, ConvertError> {
        let rate = entry
            .rates
            .get(to)
            .copied()
            .ok_or(ConvertError::RateUnavailable)?;
        Ok(Self {
            amount,
            from: from.to_string(),
            to: to.to_string(),
            rate,
            converted: amount * rate,
            rates_fetched_at: Some(entry.fetched_at),
        })
    }
}

/// Parses a user-entered amount. Anything that is not a finite number
/// strictly greater than zero is rejected.
pub fn parse_amount(raw: &str) -> Result<f64, ConvertError> {
    let amount: f64 = raw.trim().parse().map_err(|_| ConvertError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConvertError::InvalidAmount);
    }
    Ok(amount)
}

/// Formats an amount for display: en-US digit grouping with a minimum of
/// 2 and a maximum of 6 fractional digits. Display only; computations
/// stay unrounded.
pub fn format_amount(value: f64) -> String {
    let rounded = format!("{value:.6}");
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some(parts) => parts,
        None => (rounded.as_str(), ""),
    };
    let frac = frac_part.trim_end_matches('0');
    let frac = if frac.len() < 2 {
        format!("{frac:0<2}")
    } else {
        frac.to_string()
    };
    format!("{}.{frac}", group_thousands(int_part))
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = digits
        .strip_prefix('-')
        .map_or(("", digits), |rest| ("-", rest));
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}
