//! Sandbox ledger: in-memory execution environment
//!
//! Implements [`Ledger`] with the rules the contract relies on:
//! - Base currency balances with a per-account minimum balance that grows
//!   with each asset opt-in
//! - Asset holdings that exist only after opt-in
//! - Clawback transfers gated on the asset's clawback address
//! - All-or-nothing group execution (state restored on any failure)
//!
//! Also carries the setup primitives deployment needs (funding accounts,
//! creating assets, allocating application ids) so full flows can be driven
//! in tests.

use std::collections::BTreeMap;

use benefit_types::asset::AssetParams;
use benefit_types::ids::{Address, AppId, AssetId};
use tracing::debug;

use crate::errors::LedgerError;
use crate::ledger::{AssetTransfer, Effect, GroupReceipt, Ledger, LedgerParams, PaymentTxn};

/// Balances of a single account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AccountState {
    /// Base currency balance
    balance: u64,
    /// Holdings by asset; presence means opted in
    holdings: BTreeMap<AssetId, u64>,
}

/// In-memory ledger.
///
/// `BTreeMap` keeps iteration order deterministic.
#[derive(Debug, Clone)]
pub struct SandboxLedger {
    params: LedgerParams,
    accounts: BTreeMap<Address, AccountState>,
    assets: BTreeMap<AssetId, AssetParams>,
    next_asset_id: u64,
    next_app_id: u64,
    /// Committed groups (append-only)
    receipts: Vec<GroupReceipt>,
}

impl SandboxLedger {
    pub fn new(params: LedgerParams) -> Self {
        Self {
            params,
            accounts: BTreeMap::new(),
            assets: BTreeMap::new(),
            next_asset_id: 1,
            next_app_id: 1,
            receipts: Vec::new(),
        }
    }

    pub fn with_default_params() -> Self {
        Self::new(LedgerParams::default())
    }

    /// Set the id the next created asset receives. Creation fails with
    /// `AssetIdInUse` if that id is already taken.
    pub fn with_next_asset_id(mut self, next: u64) -> Self {
        self.next_asset_id = next.max(1);
        self
    }

    // ───────────────────────── Setup ─────────────────────────

    /// Credit base currency to `account` out of thin air.
    pub fn fund(&mut self, account: Address, amount: u64) -> Result<(), LedgerError> {
        let state = self.accounts.entry(account).or_default();
        state.balance = state
            .balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    /// Register a new asset. The whole supply goes to `creator`, who is
    /// opted in implicitly and must cover the extra minimum balance.
    pub fn create_asset(
        &mut self,
        creator: Address,
        params: AssetParams,
    ) -> Result<AssetId, LedgerError> {
        let current = self.accounts.get(&creator).cloned().unwrap_or_default();
        let required = self.params.min_balance_for(current.holdings.len() + 1);
        if current.balance < required {
            return Err(LedgerError::BelowMinimumBalance {
                account: creator,
                required,
                balance: current.balance,
            });
        }

        let asset = AssetId::new(self.next_asset_id);
        if self.assets.contains_key(&asset) {
            return Err(LedgerError::AssetIdInUse { asset });
        }
        self.next_asset_id = self
            .next_asset_id
            .checked_add(1)
            .ok_or(LedgerError::Overflow)?;

        self.accounts
            .entry(creator)
            .or_default()
            .holdings
            .insert(asset, params.total);

        debug!(
            asset = %asset,
            creator = %creator.short(),
            total = params.total,
            display_total = ?params.display_amount(params.total),
            "Asset created"
        );
        self.assets.insert(asset, params);
        Ok(asset)
    }

    /// Allocate an id for a new application.
    pub fn create_application(&mut self) -> AppId {
        let app = AppId::new(self.next_app_id);
        self.next_app_id += 1;
        app
    }

    // ───────────────────────── Queries ─────────────────────────

    /// Base currency balance of `account`.
    pub fn balance(&self, account: &Address) -> u64 {
        self.accounts.get(account).map_or(0, |a| a.balance)
    }

    /// Minimum balance `account` must currently keep.
    pub fn min_balance_of(&self, account: &Address) -> u64 {
        let opt_ins = self.accounts.get(account).map_or(0, |a| a.holdings.len());
        self.params.min_balance_for(opt_ins)
    }

    pub fn asset_params(&self, asset: AssetId) -> Option<&AssetParams> {
        self.assets.get(&asset)
    }

    /// Sum of all holdings of `asset`. Equals total supply unless broken.
    pub fn circulating(&self, asset: AssetId) -> u64 {
        self.accounts
            .values()
            .filter_map(|a| a.holdings.get(&asset))
            .sum()
    }

    pub fn receipts(&self) -> &[GroupReceipt] {
        &self.receipts
    }

    // ───────────────────────── Effect Execution ─────────────────────────

    fn apply(&mut self, effect: &Effect) -> Result<(), LedgerError> {
        match effect {
            Effect::Payment(payment) => self.apply_payment(payment),
            Effect::AssetTransfer(transfer) if transfer.is_opt_in() => self.apply_opt_in(transfer),
            Effect::AssetTransfer(transfer) => self.apply_asset_transfer(transfer),
        }
    }

    fn apply_payment(&mut self, payment: &PaymentTxn) -> Result<(), LedgerError> {
        let available = self.balance(&payment.sender);
        if available < payment.amount {
            return Err(LedgerError::InsufficientFunds {
                account: payment.sender,
                required: payment.amount,
                available,
            });
        }
        if payment.sender == payment.receiver {
            return Ok(());
        }

        self.debit_funds(&payment.sender, payment.amount)?;
        self.fund(payment.receiver, payment.amount)?;

        self.check_min_balance(&payment.sender)?;
        self.check_min_balance(&payment.receiver)
    }

    fn apply_opt_in(&mut self, transfer: &AssetTransfer) -> Result<(), LedgerError> {
        if !self.assets.contains_key(&transfer.xfer_asset) {
            return Err(LedgerError::AssetNotFound {
                asset: transfer.xfer_asset,
            });
        }
        if self.is_opted_in(&transfer.sender, transfer.xfer_asset) {
            // zero transfer to self on an existing holding
            return Ok(());
        }

        self.accounts
            .entry(transfer.sender)
            .or_default()
            .holdings
            .insert(transfer.xfer_asset, 0);
        self.check_min_balance(&transfer.sender)
    }

    fn apply_asset_transfer(&mut self, transfer: &AssetTransfer) -> Result<(), LedgerError> {
        let asset = transfer.xfer_asset;
        let params = self
            .assets
            .get(&asset)
            .ok_or(LedgerError::AssetNotFound { asset })?;

        if transfer.revocation_target.is_some() && !params.can_claw_back(&transfer.sender) {
            return Err(LedgerError::ClawbackNotAuthorized {
                sender: transfer.sender,
                asset,
            });
        }

        let source = transfer.source();
        let available = self
            .asset_balance(&source, asset)
            .ok_or(LedgerError::NotOptedIn {
                account: source,
                asset,
            })?;
        if !self.is_opted_in(&transfer.receiver, asset) {
            return Err(LedgerError::NotOptedIn {
                account: transfer.receiver,
                asset,
            });
        }
        if available < transfer.amount {
            return Err(LedgerError::InsufficientBalance {
                account: source,
                asset,
                required: transfer.amount,
                available,
            });
        }
        if source == transfer.receiver {
            return Ok(());
        }

        self.adjust_holding(&source, asset, |h| h.checked_sub(transfer.amount))?;
        self.adjust_holding(&transfer.receiver, asset, |h| h.checked_add(transfer.amount))
    }

    fn debit_funds(&mut self, account: &Address, amount: u64) -> Result<(), LedgerError> {
        let state = self.accounts.entry(*account).or_default();
        state.balance = state
            .balance
            .checked_sub(amount)
            .ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn adjust_holding(
        &mut self,
        account: &Address,
        asset: AssetId,
        op: impl FnOnce(u64) -> Option<u64>,
    ) -> Result<(), LedgerError> {
        let holding = self
            .accounts
            .get_mut(account)
            .and_then(|a| a.holdings.get_mut(&asset))
            .ok_or(LedgerError::NotOptedIn {
                account: *account,
                asset,
            })?;
        *holding = op(*holding).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn check_min_balance(&self, account: &Address) -> Result<(), LedgerError> {
        let required = self.min_balance_of(account);
        let balance = self.balance(account);
        if balance < required {
            return Err(LedgerError::BelowMinimumBalance {
                account: *account,
                required,
                balance,
            });
        }
        Ok(())
    }
}

impl Default for SandboxLedger {
    fn default() -> Self {
        Self::with_default_params()
    }
}

impl Ledger for SandboxLedger {
    fn params(&self) -> &LedgerParams {
        &self.params
    }

    fn is_opted_in(&self, account: &Address, asset: AssetId) -> bool {
        self.accounts
            .get(account)
            .is_some_and(|a| a.holdings.contains_key(&asset))
    }

    fn asset_balance(&self, account: &Address, asset: AssetId) -> Option<u64> {
        self.accounts
            .get(account)
            .and_then(|a| a.holdings.get(&asset))
            .copied()
    }

    fn execute_group(
        &mut self,
        signers: &[Address],
        effects: Vec<Effect>,
    ) -> Result<GroupReceipt, LedgerError> {
        if effects.is_empty() {
            return Err(LedgerError::EmptyGroup);
        }
        if let Some(unsigned) = effects.iter().find(|e| !signers.contains(&e.authorizer())) {
            let account = unsigned.authorizer();
            debug!(effect = unsigned.label(), account = %account.short(), "Group missing signature");
            return Err(LedgerError::MissingSignature { account });
        }

        let snapshot = self.accounts.clone();
        for (index, effect) in effects.iter().enumerate() {
            if let Err(err) = self.apply(effect) {
                self.accounts = snapshot;
                debug!(index, effect = effect.label(), error = %err, "Group rolled back");
                return Err(err);
            }
        }

        let receipt = GroupReceipt::new(effects.len());
        debug!(group_id = %receipt.group_id, effects = effects.len(), "Group committed");
        self.receipts.push(receipt.clone());
        Ok(receipt)
    }
}
