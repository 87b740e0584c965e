//! Persisted global state and its commitment hash
//!
//! The contract persists exactly two fields. Holdings live on the ledger.
//! The state hash is SHA-256 over a fixed 40-byte layout: the asset id as
//! 8 big-endian bytes followed by the 32 admin address bytes.

use benefit_types::ids::{Address, AssetId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Persisted layout of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalState {
    pub asset_id: AssetId,
    pub admin: Address,
}

impl GlobalState {
    /// Fixed-width encoding the state hash commits to.
    pub fn to_bytes(&self) -> [u8; 40] {
        let mut bytes = [0u8; 40];
        bytes[..8].copy_from_slice(&self.asset_id.get().to_be_bytes());
        bytes[8..].copy_from_slice(self.admin.as_bytes());
        bytes
    }

    /// SHA-256 commitment over [`GlobalState::to_bytes`].
    pub fn state_hash(&self) -> [u8; 32] {
        compute_hash(&self.to_bytes())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Compute SHA-256 hash of arbitrary data.
pub fn compute_hash(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Whether the application account currently holds the managed asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustodyStatus {
    NotHolding,
    Holding,
}

/// Creation state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
}
