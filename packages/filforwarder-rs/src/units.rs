//! FIL ↔ attoFIL conversion
//!
//! FIL has 18 decimal places; on the FEVM the attoFIL plays the role of wei.
//! Conversion is exact: fractional input with more than 18 decimal places is
//! rejected rather than silently truncated or rounded.

use alloy::primitives::U256;

use crate::error::ForwardError;

/// Number of decimal places in one FIL
pub const FIL_DECIMALS: usize = 18;

/// Parse a decimal FIL string (e.g. `"1.5"`) into attoFIL
pub fn parse_fil(input: &str) -> Result<U256, ForwardError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ForwardError::InvalidAmount("empty amount".into()));
    }

    let (whole, frac) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(ForwardError::InvalidAmount("no digits".into()));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
        return Err(ForwardError::InvalidAmount(format!(
            "not a decimal number: {input}"
        )));
    }
    if frac.len() > FIL_DECIMALS {
        return Err(ForwardError::InvalidAmount(format!(
            "more than {FIL_DECIMALS} decimal places: {input}"
        )));
    }

    let whole_atto = if whole.is_empty() {
        U256::ZERO
    } else {
        let units = U256::from_str_radix(whole, 10)
            .map_err(|e| ForwardError::InvalidAmount(e.to_string()))?;
        units
            .checked_mul(atto_per_fil())
            .ok_or_else(|| ForwardError::InvalidAmount(format!("amount overflows: {input}")))?
    };

    let frac_atto = if frac.is_empty() {
        U256::ZERO
    } else {
        let digits = U256::from_str_radix(frac, 10)
            .map_err(|e| ForwardError::InvalidAmount(e.to_string()))?;
        digits * pow10(FIL_DECIMALS - frac.len())
    };

    whole_atto
        .checked_add(frac_atto)
        .ok_or_else(|| ForwardError::InvalidAmount(format!("amount overflows: {input}")))
}

/// Render an attoFIL value as a decimal FIL string, trimming trailing zeros
pub fn format_fil(atto: U256) -> String {
    let scale = atto_per_fil();
    let whole = atto / scale;
    let frac = atto % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = FIL_DECIMALS);
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

fn atto_per_fil() -> U256 {
    pow10(FIL_DECIMALS)
}

fn pow10(exp: usize) -> U256 {
    U256::from(10u64).pow(U256::from(exp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atto(s: &str) -> U256 {
        U256::from_str_radix(s, 10).unwrap()
    }

    #[test]
    fn test_whole_fil() {
        assert_eq!(parse_fil("1").unwrap(), atto("1000000000000000000"));
        assert_eq!(parse_fil("42").unwrap(), atto("42000000000000000000"));
    }

    #[test]
    fn test_fractional_fil() {
        assert_eq!(parse_fil("1.5").unwrap(), atto("1500000000000000000"));
        assert_eq!(parse_fil("0.000000000000000001").unwrap(), U256::from(1));
        assert_eq!(parse_fil(".5").unwrap(), atto("500000000000000000"));
    }

    #[test]
    fn test_zero_parses() {
        // Zero is a valid number; rejecting it is the intent builder's job
        assert_eq!(parse_fil("0").unwrap(), U256::ZERO);
        assert_eq!(parse_fil("0.0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_too_many_decimal_places_rejected() {
        // 19 decimal places: rejected, never truncated
        let err = parse_fil("1.0000000000000000001").unwrap_err();
        assert!(matches!(err, ForwardError::InvalidAmount(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        for bad in ["", " ", "abc", "1.2.3", "-1", "1e18", "1,5", "."] {
            assert!(
                matches!(parse_fil(bad), Err(ForwardError::InvalidAmount(_))),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn test_overflow_rejected() {
        // 78 nines exceeds U256 once scaled by 10^18
        let huge = "9".repeat(78);
        assert!(matches!(
            parse_fil(&huge),
            Err(ForwardError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_format_fil() {
        assert_eq!(format_fil(atto("1000000000000000000")), "1");
        assert_eq!(format_fil(atto("1500000000000000000")), "1.5");
        assert_eq!(format_fil(U256::from(1)), "0.000000000000000001");
        assert_eq!(format_fil(U256::ZERO), "0");
    }

    #[test]
    fn test_parse_format_roundtrip() {
        for s in ["1", "1.5", "0.25", "123456.789"] {
            assert_eq!(format_fil(parse_fil(s).unwrap()), s);
        }
    }
}
