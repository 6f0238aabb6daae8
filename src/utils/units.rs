use ethers::types::U256;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::types::error::DisburseError;

/// Decimal places of the stablecoin's base-unit representation: one display
/// unit is 10^6 base units.
pub const TOKEN_DECIMALS: u32 = 6;

/// Converts a display amount to base units, truncating any precision beyond
/// the token's.
pub fn to_base_units(amount: Decimal) -> Result<U256, DisburseError> {
    let out_of_range = || DisburseError::InvalidInput(format!("amount out of range: {amount}"));

    let scaled = amount
        .checked_mul(Decimal::from(10u64.pow(TOKEN_DECIMALS)))
        .ok_or_else(out_of_range)?
        .trunc();
    let units = scaled.to_u128().ok_or_else(out_of_range)?;
    Ok(U256::from(units))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn scales_whole_units_with_cents() {
        assert_eq!(to_base_units(dec!(100.50)).unwrap(), U256::from(100_500_000u64));
        assert_eq!(to_base_units(dec!(49.5)).unwrap(), U256::from(49_500_000u64));
        assert_eq!(to_base_units(dec!(150.00)).unwrap(), U256::from(150_000_000u64));
    }

    #[test]
    fn scales_the_smallest_representable_amount() {
        assert_eq!(to_base_units(dec!(0.000001)).unwrap(), U256::from(1u64));
    }

    #[test]
    fn truncates_precision_below_the_token() {
        assert_eq!(to_base_units(dec!(0.0000005)).unwrap(), U256::zero());
        assert_eq!(to_base_units(dec!(1.0000019)).unwrap(), U256::from(1_000_001u64));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(to_base_units(dec!(-1)).is_err());
    }

    #[test]
    fn six_decimal_amounts_scale_without_loss() {
        let cases = [
            (dec!(1), 1_000_000u64),
            (dec!(0.123456), 123_456),
            (dec!(12345.678901), 12_345_678_901),
        ];
        for (amount, units) in cases {
            assert_eq!(to_base_units(amount).unwrap(), U256::from(units));
        }
    }
}
