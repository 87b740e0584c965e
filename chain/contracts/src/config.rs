//! Contract configuration
//!
//! Values fixed at construction time. The disbursement amount is part of the
//! deployment rather than a literal in the disbursement path, so changing it
//! means deploying with a different config.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Default number of base units paid out per disbursement.
pub const DEFAULT_DISBURSEMENT_AMOUNT: u64 = 100;

/// Configuration for the benefits contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Base units transferred to a beneficiary per disbursement
    pub disbursement_amount: u64,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            disbursement_amount: DEFAULT_DISBURSEMENT_AMOUNT,
        }
    }
}

impl ContractConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.disbursement_amount == 0 {
            return Err(ConfigError::ZeroDisbursement);
        }
        Ok(())
    }
}
