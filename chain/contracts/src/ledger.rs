//! Ledger seam: the execution environment the contract runs against
//!
//! The contract never moves value itself. It validates a call, builds the
//! list of effects the call should have, and hands the whole list to the
//! ledger, which executes it all-or-nothing.

use benefit_types::ids::{Address, AssetId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::LedgerError;

/// Protocol minimum-balance parameters, in base currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerParams {
    /// Minimum balance every account must keep
    pub min_balance: u64,
    /// Additional minimum balance per asset an account is opted in to
    pub asset_opt_in_min_balance: u64,
}

impl Default for LedgerParams {
    fn default() -> Self {
        Self {
            min_balance: 100_000,
            asset_opt_in_min_balance: 100_000,
        }
    }
}

impl LedgerParams {
    /// Funding an account with no holdings needs before it can opt in to one asset.
    pub fn opt_in_funding_requirement(&self) -> u64 {
        self.min_balance.saturating_add(self.asset_opt_in_min_balance)
    }

    /// Minimum balance of an account opted in to `opt_ins` assets.
    pub fn min_balance_for(&self, opt_ins: usize) -> u64 {
        self.asset_opt_in_min_balance
            .saturating_mul(opt_ins as u64)
            .saturating_add(self.min_balance)
    }
}

/// Transaction context of a call: who sent it and who else signed the group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    pub sender: Address,
    /// Accounts that co-signed the group, e.g. a third party paying for opt-in
    pub co_signers: Vec<Address>,
}

impl CallContext {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            co_signers: Vec::new(),
        }
    }

    pub fn with_co_signer(mut self, signer: Address) -> Self {
        if signer != self.sender && !self.co_signers.contains(&signer) {
            self.co_signers.push(signer);
        }
        self
    }

    /// Sender first, then co-signers.
    pub fn signers(&self) -> impl Iterator<Item = &Address> + '_ {
        std::iter::once(&self.sender).chain(self.co_signers.iter())
    }
}

/// Base currency payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTxn {
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
}

impl PaymentTxn {
    pub fn new(sender: Address, receiver: Address, amount: u64) -> Self {
        Self {
            sender,
            receiver,
            amount,
        }
    }
}

/// Asset transfer.
///
/// With `revocation_target` set, units are taken from that account instead
/// of the sender, which requires the sender to be the asset's clawback
/// address. A zero-amount transfer from an account to itself registers the
/// account as a holder (opt-in).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransfer {
    pub xfer_asset: AssetId,
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
    pub revocation_target: Option<Address>,
    /// Always zero for transfers the contract issues
    pub fee: u64,
}

impl AssetTransfer {
    pub fn new(xfer_asset: AssetId, sender: Address, receiver: Address, amount: u64) -> Self {
        Self {
            xfer_asset,
            sender,
            receiver,
            amount,
            revocation_target: None,
            fee: 0,
        }
    }

    /// Zero-amount self transfer registering `account` as a holder of `asset`.
    pub fn opt_in(asset: AssetId, account: Address) -> Self {
        Self::new(asset, account, account, 0)
    }

    /// Transfer of `amount` from `target` to `receiver`, signed by the clawback authority.
    pub fn clawback(
        asset: AssetId,
        authority: Address,
        target: Address,
        receiver: Address,
        amount: u64,
    ) -> Self {
        Self {
            revocation_target: Some(target),
            ..Self::new(asset, authority, receiver, amount)
        }
    }

    pub fn is_opt_in(&self) -> bool {
        self.revocation_target.is_none() && self.amount == 0 && self.sender == self.receiver
    }

    /// Account the units leave.
    pub fn source(&self) -> Address {
        self.revocation_target.unwrap_or(self.sender)
    }
}

/// One effect inside an atomic group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Payment(PaymentTxn),
    AssetTransfer(AssetTransfer),
}

impl Effect {
    pub fn label(&self) -> &'static str {
        match self {
            Effect::Payment(_) => "payment",
            Effect::AssetTransfer(t) if t.is_opt_in() => "opt_in",
            Effect::AssetTransfer(t) if t.revocation_target.is_some() => "clawback",
            Effect::AssetTransfer(_) => "asset_transfer",
        }
    }

    /// Account whose signature the effect needs. For a clawback this is
    /// the clawback authority, not the account the units leave.
    pub fn authorizer(&self) -> Address {
        match self {
            Effect::Payment(p) => p.sender,
            Effect::AssetTransfer(t) => t.sender,
        }
    }
}

/// Confirmation of a committed group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupReceipt {
    pub group_id: Uuid,
    pub effect_count: usize,
    pub confirmed_at: DateTime<Utc>,
}

impl GroupReceipt {
    pub fn new(effect_count: usize) -> Self {
        Self {
            group_id: Uuid::now_v7(),
            effect_count,
            confirmed_at: Utc::now(),
        }
    }
}

/// Execution environment the contract submits effects to.
pub trait Ledger {
    /// Protocol minimum-balance parameters.
    fn params(&self) -> &LedgerParams;

    /// Whether `account` is registered as a holder of `asset`.
    fn is_opted_in(&self, account: &Address, asset: AssetId) -> bool;

    /// Holding of `asset` by `account`, `None` if not opted in.
    fn asset_balance(&self, account: &Address, asset: AssetId) -> Option<u64>;

    /// Execute `effects` in order. Either every effect commits or none does.
    ///
    /// `signers` are the accounts that signed the group. Every effect's
    /// [`Effect::authorizer`] must be among them.
    fn execute_group(
        &mut self,
        signers: &[Address],
        effects: Vec<Effect>,
    ) -> Result<GroupReceipt, LedgerError>;
}
