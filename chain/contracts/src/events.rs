//! Contract events
//!
//! Immutable records emitted by successful contract operations. Rejected
//! calls emit nothing.

use benefit_types::ids::{Address, AppId, AssetId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::security::EligibilityProof;

/// Application created and identity fields set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCreated {
    pub app_id: AppId,
    pub asset_id: AssetId,
    pub admin: Address,
}

/// Application account opted in to the managed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyAccepted {
    pub app_id: AppId,
    pub asset_id: AssetId,
    pub funding_amount: u64,
    pub group_id: Uuid,
}

/// Fixed benefit paid to a beneficiary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitDisbursed {
    pub asset_id: AssetId,
    pub beneficiary: Address,
    pub amount: u64,
    pub proof: EligibilityProof,
    pub group_id: Uuid,
}

/// Units recovered from a holder to the admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitClawedBack {
    pub asset_id: AssetId,
    pub target: Address,
    pub receiver: Address,
    pub amount: u64,
    pub group_id: Uuid,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    ApplicationCreated(ApplicationCreated),
    CustodyAccepted(CustodyAccepted),
    BenefitDisbursed(BenefitDisbursed),
    BenefitClawedBack(BenefitClawedBack),
}
