//! Fungible asset parameters
//!
//! Describes an asset as it is registered on the ledger: total supply,
//! display precision, names, and the role addresses that hold special
//! authority over it. The clawback address is the only account allowed to
//! move units out of a holder without the holder's signature.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::Address;
use crate::numeric::to_display_units;

/// Parameters of a fungible asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    /// Total supply in base units, minted to the creator
    pub total: u64,
    /// Number of decimal places used for display
    pub decimals: u32,
    /// Whether new holdings start frozen
    pub default_frozen: bool,
    pub unit_name: String,
    pub asset_name: String,
    /// May reconfigure the asset's role addresses
    pub manager: Option<Address>,
    /// Holds non-circulating supply
    pub reserve: Option<Address>,
    /// May freeze holdings
    pub freeze: Option<Address>,
    /// May revoke units from any holder
    pub clawback: Option<Address>,
}

impl AssetParams {
    /// Asset with no role addresses set.
    pub fn new(
        asset_name: impl Into<String>,
        unit_name: impl Into<String>,
        total: u64,
        decimals: u32,
    ) -> Self {
        Self {
            total,
            decimals,
            default_frozen: false,
            unit_name: unit_name.into(),
            asset_name: asset_name.into(),
            manager: None,
            reserve: None,
            freeze: None,
            clawback: None,
        }
    }

    pub fn with_manager(mut self, manager: Address) -> Self {
        self.manager = Some(manager);
        self
    }

    pub fn with_reserve(mut self, reserve: Address) -> Self {
        self.reserve = Some(reserve);
        self
    }

    pub fn with_freeze(mut self, freeze: Address) -> Self {
        self.freeze = Some(freeze);
        self
    }

    pub fn with_clawback(mut self, clawback: Address) -> Self {
        self.clawback = Some(clawback);
        self
    }

    /// Whether `address` holds clawback authority over this asset.
    pub fn can_claw_back(&self, address: &Address) -> bool {
        self.clawback.as_ref() == Some(address)
    }

    /// Display value of `base_units` of this asset.
    pub fn display_amount(&self, base_units: u64) -> Option<Decimal> {
        to_display_units(base_units, self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clawback_authority() {
        let authority = Address::from_bytes([9u8; 32]);
        let other = Address::from_bytes([8u8; 32]);
        let params = AssetParams::new("Government Benefit Token", "BNFT", 1_000_000_000, 2)
            .with_clawback(authority);

        assert!(params.can_claw_back(&authority));
        assert!(!params.can_claw_back(&other));
    }

    #[test]
    fn test_no_clawback_by_default() {
        let params = AssetParams::new("Token", "TKN", 10, 0);
        assert!(!params.can_claw_back(&Address::ZERO));
    }

    #[test]
    fn test_display_amount_uses_decimals() {
        let params = AssetParams::new("Government Benefit Token", "BNFT", 1_000_000_000, 2);
        assert_eq!(params.display_amount(100).unwrap().to_string(), "1.00");
    }

    #[test]
    fn test_params_serialization() {
        let params = AssetParams::new("Token", "TKN", 10, 0)
            .with_manager(Address::from_bytes([1u8; 32]));
        let json = serde_json::to_string(&params).unwrap();
        let deserialized: AssetParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, deserialized);
    }
}
