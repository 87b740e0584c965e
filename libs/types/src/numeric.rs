//! Base-unit amounts and their display form
//!
//! The ledger only ever moves integer base units. An asset's `decimals`
//! parameter says where the decimal point sits when showing an amount to a
//! person: 100 base units of a 2-decimal asset display as `1.00`.

use rust_decimal::Decimal;

/// Largest scale `rust_decimal` can represent.
pub const MAX_DECIMALS: u32 = 28;

/// Convert an integer amount of base units to its display value.
///
/// Returns `None` when `decimals` exceeds [`MAX_DECIMALS`].
pub fn to_display_units(base_units: u64, decimals: u32) -> Option<Decimal> {
    if decimals > MAX_DECIMALS {
        return None;
    }
    Decimal::try_from_i128_with_scale(base_units as i128, decimals).ok()
}
