//! Contract-specific error types
//!
//! Error taxonomy for the custody contract, the ledger it drives, and its
//! configuration.

use benefit_types::ids::{Address, AssetId};
use thiserror::Error;

/// Failures surfaced by the ledger when executing a group of effects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient balance of asset {asset} for {account}: required {required}, available {available}")]
    InsufficientBalance {
        account: Address,
        asset: AssetId,
        required: u64,
        available: u64,
    },

    #[error("Insufficient funds for {account}: required {required}, available {available}")]
    InsufficientFunds {
        account: Address,
        required: u64,
        available: u64,
    },

    #[error("Account {account} would fall below its minimum balance: required {required}, balance {balance}")]
    BelowMinimumBalance {
        account: Address,
        required: u64,
        balance: u64,
    },

    #[error("Account {account} is not opted in to asset {asset}")]
    NotOptedIn { account: Address, asset: AssetId },

    #[error("Asset not found: {asset}")]
    AssetNotFound { asset: AssetId },

    #[error("Account {sender} has no clawback authority over asset {asset}")]
    ClawbackNotAuthorized { sender: Address, asset: AssetId },

    #[error("Missing signature: effect requires {account} to sign the group")]
    MissingSignature { account: Address },

    #[error("Asset id already in use: {asset}")]
    AssetIdInUse { asset: AssetId },

    #[error("Arithmetic overflow in balance calculation")]
    Overflow,

    #[error("Empty group: no effects to execute")]
    EmptyGroup,
}

/// Failures of the custody contract's operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustodyError {
    #[error("Unauthorized: caller is not admin")]
    Unauthorized,

    #[error("Already in custody: application is opted in to the asset")]
    AlreadyInCustody,

    #[error("Misdirected funding: payment receiver {receiver} is not the application account")]
    MisdirectedFunding { receiver: Address },

    #[error("Insufficient funding: required {required}, provided {provided}")]
    InsufficientFunding { required: u64, provided: u64 },

    #[error("Application already created")]
    AlreadyInitialized,

    #[error("Application not created")]
    NotInitialized,

    #[error("Invalid asset id: asset id must be nonzero")]
    InvalidAssetId,

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Disbursement amount must be positive")]
    ZeroDisbursement,

    #[error("Persisted state has a zero asset id")]
    ZeroAssetId,
}
