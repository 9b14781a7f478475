//! XRP amount parsing and drops conversion.

use crate::error::{AppError, AppResult};

/// One XRP in drops, the ledger's minor unit.
pub const DROPS_PER_XRP: u64 = 1_000_000;

/// Convert a decimal XRP amount string to drops.
///
/// Amounts must be strictly positive with at most six fractional digits.
pub fn xrp_to_drops(amount: &str) -> AppResult<u64> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(AppError::validation("Amount is required"));
    }

    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(AppError::validation("Amount must be a positive number"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::validation("Amount must be a positive number"));
    }
    if frac.len() > 6 {
        return Err(AppError::validation(
            "Amount precision is limited to 6 decimal places",
        ));
    }

    let whole: u64 = if whole.is_empty() {
        0
    } else {
        whole
            .parse()
            .map_err(|_| AppError::validation("Amount is out of range"))?
    };

    let mut frac_drops: u64 = 0;
    if !frac.is_empty() {
        frac_drops = frac.parse().unwrap_or(0);
        for _ in 0..(6 - frac.len()) {
            frac_drops *= 10;
        }
    }

    let drops = whole
        .checked_mul(DROPS_PER_XRP)
        .and_then(|d| d.checked_add(frac_drops))
        .ok_or_else(|| AppError::validation("Amount is out of range"))?;

    if drops == 0 {
        return Err(AppError::validation("Amount must be a positive number"));
    }

    Ok(drops)
}

/// Parse an amount that arrives as either a JSON number or a string.
pub fn parse_amount_field(value: &serde_json::Value) -> AppResult<u64> {
    match value {
        serde_json::Value::String(s) => xrp_to_drops(s),
        serde_json::Value::Number(n) => {
            // Route numbers through the string path so precision and
            // positivity rules apply uniformly.
            xrp_to_drops(&n.to_string())
        }
        serde_json::Value::Null => Err(AppError::validation("Amount is required")),
        _ => Err(AppError::validation("Amount must be a positive number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_whole_amounts() {
        assert_eq!(xrp_to_drops("10").unwrap(), 10_000_000);
        assert_eq!(xrp_to_drops("1").unwrap(), 1_000_000);
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(xrp_to_drops("0.000001").unwrap(), 1);
        assert_eq!(xrp_to_drops("2.5").unwrap(), 2_500_000);
        assert_eq!(xrp_to_drops(".5").unwrap(), 500_000);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert!(xrp_to_drops("0").is_err());
        assert!(xrp_to_drops("0.0").is_err());
        assert!(xrp_to_drops("-5").is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(xrp_to_drops("").is_err());
        assert!(xrp_to_drops("abc").is_err());
        assert!(xrp_to_drops("1.2.3").is_err());
        assert!(xrp_to_drops("1e6").is_err());
        assert!(xrp_to_drops(".").is_err());
    }

    #[test]
    fn test_rejects_excess_precision() {
        assert!(xrp_to_drops("1.0000001").is_err());
    }

    #[test]
    fn test_json_field_number_and_string() {
        assert_eq!(parse_amount_field(&json!("10")).unwrap(), 10_000_000);
        assert_eq!(parse_amount_field(&json!(10)).unwrap(), 10_000_000);
        assert_eq!(parse_amount_field(&json!(0.5)).unwrap(), 500_000);
        assert!(parse_amount_field(&json!(null)).is_err());
        assert!(parse_amount_field(&json!(true)).is_err());
        assert!(parse_amount_field(&json!(-1)).is_err());
    }
}
