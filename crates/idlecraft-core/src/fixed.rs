use fixed::types::I64F64;

/// Q64.64 fixed-point: 64 integer bits, 64 fractional bits.
///
/// Every currency-valued quantity (balances, costs, rates, effect values)
/// uses this type so the economy is bit-for-bit reproducible.
pub type Amount = I64F64;

/// Convert an f64 to Amount. Use only for initialization, never in the sim loop.
///
/// Saturates on out-of-range input; NaN maps to zero.
#[inline]
pub fn f64_to_amount(v: f64) -> Amount {
    if v.is_nan() {
        return Amount::ZERO;
    }
    Amount::saturating_from_num(v)
}

/// Convert an f64 to Amount, returning `None` for NaN or out-of-range input.
#[inline]
pub fn checked_f64_to_amount(v: f64) -> Option<Amount> {
    if !v.is_finite() {
        return None;
    }
    Amount::checked_from_num(v)
}

/// Convert Amount to f64. Use only for display and reporting.
#[inline]
pub fn amount_to_f64(v: Amount) -> f64 {
    v.to_num::<f64>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_basic_arithmetic() {
        let a = f64_to_amount(1.5);
        let b = f64_to_amount(2.0);
        assert_eq!(amount_to_f64(a + b), 3.5);
        assert_eq!(amount_to_f64(a * b), 3.0);
    }

    #[test]
    fn nan_maps_to_zero() {
        assert_eq!(f64_to_amount(f64::NAN), Amount::ZERO);
    }

    #[test]
    fn checked_conversion_rejects_non_finite() {
        assert!(checked_f64_to_amount(f64::INFINITY).is_none());
        assert!(checked_f64_to_amount(f64::NAN).is_none());
        assert_eq!(checked_f64_to_amount(4.0), Some(Amount::from_num(4)));
    }

    #[test]
    fn content_values_round_trip_exactly() {
        for v in [1.15, 1.07, 0.1, 1000.0, 123_456.789] {
            assert_eq!(amount_to_f64(f64_to_amount(v)), v);
        }
    }
}
