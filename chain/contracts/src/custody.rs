//! Benefits contract: admin-gated custody and disbursement of one asset
//!
//! Operations, in the order a deployment uses them:
//! - `create_application`: one-time creation, sets asset id and admin
//! - `opt_in_to_asset`: funded opt-in of the application account
//! - `claim_benefits`: fixed disbursement to a beneficiary
//! - `clawback_benefits`: forced recovery from a holder to the admin
//!
//! Every operation checks its preconditions first and only then submits its
//! effects to the ledger as one group. A rejected call leaves both the
//! contract and the ledger untouched.

use benefit_types::ids::{Address, AppId, AssetId};
use tracing::{debug, info, warn};

use crate::config::ContractConfig;
use crate::errors::{ConfigError, CustodyError};
use crate::events::{
    ApplicationCreated, BenefitClawedBack, BenefitDisbursed, ContractEvent, CustodyAccepted,
};
use crate::ledger::{AssetTransfer, CallContext, Effect, GroupReceipt, Ledger, PaymentTxn};
use crate::security::{AccessControl, EligibilityProof};
use crate::state::{CustodyStatus, GlobalState, Lifecycle};

/// Custody authorization engine for a single fungible asset.
///
/// Holds the managed asset id and the admin. Both are set by
/// `create_application` and never change afterwards. Custody itself is not
/// stored: it is whatever the ledger says about the application account's
/// opt-in.
#[derive(Debug)]
pub struct BenefitsContract {
    app_id: AppId,
    /// Managed asset; `AssetId::NONE` until created
    asset_id: AssetId,
    /// Security: single admin, assigned at creation
    access_control: AccessControl,
    config: ContractConfig,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl BenefitsContract {
    /// Construct an uncreated contract for application `app_id`.
    pub fn new(app_id: AppId) -> Self {
        Self {
            app_id,
            asset_id: AssetId::NONE,
            access_control: AccessControl::new(),
            config: ContractConfig::default(),
            events: Vec::new(),
        }
    }

    pub fn with_config(app_id: AppId, config: ContractConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(app_id)
        })
    }

    /// Rebuild a created contract from its persisted state.
    pub fn restore(
        app_id: AppId,
        config: ContractConfig,
        state: GlobalState,
    ) -> Result<Self, ConfigError> {
        if state.asset_id.is_none() {
            return Err(ConfigError::ZeroAssetId);
        }
        Ok(Self {
            asset_id: state.asset_id,
            access_control: AccessControl::with_admin(state.admin),
            ..Self::with_config(app_id, config)?
        })
    }

    // ───────────────────────── Operations ─────────────────────────

    /// Create the application: record the managed asset and make the
    /// caller admin.
    pub fn create_application(
        &mut self,
        ctx: &CallContext,
        asset_id: AssetId,
    ) -> Result<(), CustodyError> {
        if self.lifecycle() == Lifecycle::Initialized {
            return Err(self.reject("create_application", ctx, CustodyError::AlreadyInitialized));
        }
        if asset_id.is_none() {
            return Err(self.reject("create_application", ctx, CustodyError::InvalidAssetId));
        }
        if !self.access_control.assign(ctx.sender) {
            return Err(self.reject("create_application", ctx, CustodyError::AlreadyInitialized));
        }
        self.asset_id = asset_id;

        info!(
            app_id = %self.app_id,
            asset_id = %asset_id,
            admin = %ctx.sender.short(),
            "Application created"
        );
        self.events
            .push(ContractEvent::ApplicationCreated(ApplicationCreated {
                app_id: self.app_id,
                asset_id,
                admin: ctx.sender,
            }));
        Ok(())
    }

    /// Opt the application account in to the managed asset.
    ///
    /// `funding` must pay the application account at least the minimum
    /// balance plus the opt-in reserve. Payment and opt-in commit together
    /// or not at all. The payer must be the caller or one of its
    /// co-signers; the ledger rejects anyone else's money.
    ///
    /// Checks, in order: created, caller is admin, not already opted in,
    /// payment goes to the application account, payment is large enough.
    pub fn opt_in_to_asset<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        funding: PaymentTxn,
    ) -> Result<GroupReceipt, CustodyError> {
        const OP: &str = "opt_in_to_asset";
        self.check_admin(OP, ctx)?;

        let app_address = self.app_address();
        if ledger.is_opted_in(&app_address, self.asset_id) {
            return Err(self.reject(OP, ctx, CustodyError::AlreadyInCustody));
        }
        if funding.receiver != app_address {
            return Err(self.reject(
                OP,
                ctx,
                CustodyError::MisdirectedFunding {
                    receiver: funding.receiver,
                },
            ));
        }
        let required = ledger.params().opt_in_funding_requirement();
        if funding.amount < required {
            return Err(self.reject(
                OP,
                ctx,
                CustodyError::InsufficientFunding {
                    required,
                    provided: funding.amount,
                },
            ));
        }

        let funding_amount = funding.amount;
        let receipt = self.submit(
            ledger,
            OP,
            ctx,
            vec![
                Effect::Payment(funding),
                Effect::AssetTransfer(AssetTransfer::opt_in(self.asset_id, app_address)),
            ],
        )?;

        info!(
            app_id = %self.app_id,
            asset_id = %self.asset_id,
            funding_amount,
            group_id = %receipt.group_id,
            "Custody accepted"
        );
        self.events.push(ContractEvent::CustodyAccepted(CustodyAccepted {
            app_id: self.app_id,
            asset_id: self.asset_id,
            funding_amount,
            group_id: receipt.group_id,
        }));
        Ok(receipt)
    }

    /// Pay the configured benefit amount to `beneficiary`.
    ///
    /// `proof` is not verified here. Holdings are not checked here either;
    /// an overdraw comes back from the ledger as `InsufficientBalance`.
    pub fn claim_benefits<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        beneficiary: Address,
        proof: EligibilityProof,
    ) -> Result<GroupReceipt, CustodyError> {
        const OP: &str = "claim_benefits";
        self.check_admin(OP, ctx)?;

        let amount = self.config.disbursement_amount;
        let transfer = AssetTransfer::new(self.asset_id, self.app_address(), beneficiary, amount);
        let receipt = self.submit(ledger, OP, ctx, vec![Effect::AssetTransfer(transfer)])?;

        info!(
            asset_id = %self.asset_id,
            beneficiary = %beneficiary.short(),
            amount,
            proof_len = proof.len(),
            "Benefit disbursed"
        );
        self.events
            .push(ContractEvent::BenefitDisbursed(BenefitDisbursed {
                asset_id: self.asset_id,
                beneficiary,
                amount,
                proof,
                group_id: receipt.group_id,
            }));
        Ok(receipt)
    }

    /// Move `amount` units from `target` back to the admin using the
    /// application's clawback authority.
    pub fn clawback_benefits<L: Ledger>(
        &mut self,
        ledger: &mut L,
        ctx: &CallContext,
        target: Address,
        amount: u64,
    ) -> Result<GroupReceipt, CustodyError> {
        const OP: &str = "clawback_benefits";
        let admin = self.check_admin(OP, ctx)?;

        let transfer =
            AssetTransfer::clawback(self.asset_id, self.app_address(), target, admin, amount);
        let receipt = self.submit(ledger, OP, ctx, vec![Effect::AssetTransfer(transfer)])?;

        info!(
            asset_id = %self.asset_id,
            target = %target.short(),
            amount,
            "Benefit clawed back"
        );
        self.events
            .push(ContractEvent::BenefitClawedBack(BenefitClawedBack {
                asset_id: self.asset_id,
                target,
                receiver: admin,
                amount,
                group_id: receipt.group_id,
            }));
        Ok(receipt)
    }

    // ───────────────────────── Queries ─────────────────────────

    pub fn app_id(&self) -> AppId {
        self.app_id
    }

    /// Address of the application's own account.
    pub fn app_address(&self) -> Address {
        self.app_id.address()
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    pub fn admin(&self) -> Option<&Address> {
        self.access_control.admin()
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.access_control.admin() {
            Some(_) => Lifecycle::Initialized,
            None => Lifecycle::Uninitialized,
        }
    }

    /// Persisted state, `None` before creation.
    pub fn global_state(&self) -> Option<GlobalState> {
        self.access_control.admin().map(|admin| GlobalState {
            asset_id: self.asset_id,
            admin: *admin,
        })
    }

    /// Custody as currently recorded by `ledger`.
    pub fn custody_status<L: Ledger>(&self, ledger: &L) -> CustodyStatus {
        if self.lifecycle() == Lifecycle::Initialized
            && ledger.is_opted_in(&self.app_address(), self.asset_id)
        {
            CustodyStatus::Holding
        } else {
            CustodyStatus::NotHolding
        }
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    /// Require a created contract and an admin caller. Returns the admin.
    fn check_admin(&self, op: &'static str, ctx: &CallContext) -> Result<Address, CustodyError> {
        let admin = match self.access_control.admin() {
            Some(admin) => *admin,
            None => return Err(self.reject(op, ctx, CustodyError::NotInitialized)),
        };
        if !self.access_control.is_admin(&ctx.sender) {
            return Err(self.reject(op, ctx, CustodyError::Unauthorized));
        }
        Ok(admin)
    }

    fn submit<L: Ledger>(
        &self,
        ledger: &mut L,
        op: &'static str,
        ctx: &CallContext,
        effects: Vec<Effect>,
    ) -> Result<GroupReceipt, CustodyError> {
        // inner transfers are signed by the application account itself
        let signers: Vec<Address> = ctx
            .signers()
            .copied()
            .chain(std::iter::once(self.app_address()))
            .collect();
        debug!(
            operation = op,
            effects = effects.len(),
            signers = signers.len(),
            "Submitting group"
        );
        ledger
            .execute_group(&signers, effects)
            .map_err(|err| self.reject(op, ctx, err.into()))
    }

    fn reject(&self, op: &'static str, ctx: &CallContext, err: CustodyError) -> CustodyError {
        warn!(
            app_id = %self.app_id,
            operation = op,
            caller = %ctx.sender.short(),
            reason = %err,
            "Call rejected"
        );
        err
    }
}
