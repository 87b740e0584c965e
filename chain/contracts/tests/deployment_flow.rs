//! End-to-end deployment flow
//!
//! Drives the contract the way a deployment does: create the benefit token,
//! create the application, fund and opt it in as one group, stock it with
//! tokens, then disburse and claw back. Principals are Ed25519 keys.

use benefit_contracts::config::ContractConfig;
use benefit_contracts::custody::BenefitsContract;
use benefit_contracts::events::ContractEvent;
use benefit_contracts::ledger::{AssetTransfer, CallContext, Effect, Ledger, PaymentTxn};
use benefit_contracts::sandbox::SandboxLedger;
use benefit_contracts::state::{CustodyStatus, Lifecycle};
use benefit_types::asset::AssetParams;
use benefit_types::ids::{Address, AssetId};
use ed25519_dalek::SigningKey;

/// Initial supply transferred into the contract after opt-in.
const CONTRACT_STOCK: u64 = 500_000;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn principal(seed: u8) -> Address {
    let key = SigningKey::from_bytes(&[seed; 32]);
    Address::from_public_key(&key.verifying_key())
}

fn benefit_token(clawback: Address, manager: Address) -> AssetParams {
    AssetParams::new("Government Benefit Token", "BNFT", 1_000_000_000, 2)
        .with_manager(manager)
        .with_reserve(manager)
        .with_freeze(manager)
        .with_clawback(clawback)
}

fn opt_in(ledger: &mut SandboxLedger, account: Address, asset: AssetId) {
    ledger.fund(account, 1_000_000).unwrap();
    ledger
        .execute_group(
            &[account],
            vec![Effect::AssetTransfer(AssetTransfer::opt_in(asset, account))],
        )
        .unwrap();
}

#[test]
fn test_disburse_then_clawback_scenario() {
    init_tracing();
    let deployer = principal(1);
    let beneficiary = principal(2);

    let mut ledger = SandboxLedger::with_default_params().with_next_asset_id(7);
    ledger.fund(deployer, 10_000_000).unwrap();
    let app_id = ledger.create_application();
    let asset = ledger
        .create_asset(deployer, benefit_token(app_id.address(), deployer))
        .unwrap();
    assert_eq!(asset, AssetId::new(7));

    let mut contract = BenefitsContract::new(app_id);
    let admin = CallContext::new(deployer);
    contract.create_application(&admin, asset).unwrap();
    assert_eq!(contract.lifecycle(), Lifecycle::Initialized);

    let funding = PaymentTxn::new(deployer, contract.app_address(), 200_000);
    contract.opt_in_to_asset(&mut ledger, &admin, funding).unwrap();
    assert_eq!(contract.custody_status(&ledger), CustodyStatus::Holding);

    let stock = AssetTransfer::new(asset, deployer, contract.app_address(), CONTRACT_STOCK);
    ledger
        .execute_group(&[deployer], vec![Effect::AssetTransfer(stock)])
        .unwrap();

    opt_in(&mut ledger, beneficiary, asset);
    contract
        .claim_benefits(&mut ledger, &admin, beneficiary, "biometric-ok".into())
        .unwrap();
    assert_eq!(ledger.asset_balance(&beneficiary, asset), Some(100));

    let deployer_before = ledger.asset_balance(&deployer, asset).unwrap();
    contract
        .clawback_benefits(&mut ledger, &admin, beneficiary, 50)
        .unwrap();
    assert_eq!(ledger.asset_balance(&beneficiary, asset), Some(50));
    assert_eq!(
        ledger.asset_balance(&deployer, asset),
        Some(deployer_before + 50)
    );
    assert_eq!(
        ledger.asset_balance(&contract.app_address(), asset),
        Some(CONTRACT_STOCK - 100)
    );

    let kinds: Vec<&str> = contract
        .events()
        .iter()
        .map(|e| match e {
            ContractEvent::ApplicationCreated(_) => "created",
            ContractEvent::CustodyAccepted(_) => "custody",
            ContractEvent::BenefitDisbursed(_) => "disbursed",
            ContractEvent::BenefitClawedBack(_) => "clawed_back",
        })
        .collect();
    assert_eq!(kinds, ["created", "custody", "disbursed", "clawed_back"]);
}

#[test]
fn test_opt_in_group_is_atomic_with_funding() {
    init_tracing();
    let deployer = principal(1);
    let mut ledger = SandboxLedger::with_default_params();
    ledger.fund(deployer, 10_000_000).unwrap();
    let app_id = ledger.create_application();
    let asset = ledger
        .create_asset(deployer, benefit_token(app_id.address(), deployer))
        .unwrap();

    let mut contract = BenefitsContract::new(app_id);
    let admin = CallContext::new(deployer);
    contract.create_application(&admin, asset).unwrap();

    let deployer_before = ledger.balance(&deployer);
    let funding = PaymentTxn::new(deployer, contract.app_address(), 200_000);
    let receipt = contract.opt_in_to_asset(&mut ledger, &admin, funding).unwrap();

    assert_eq!(receipt.effect_count, 2);
    assert_eq!(ledger.balance(&deployer), deployer_before - 200_000);
    assert_eq!(ledger.balance(&contract.app_address()), 200_000);
    assert_eq!(ledger.min_balance_of(&contract.app_address()), 200_000);
    match contract.events().last() {
        Some(ContractEvent::CustodyAccepted(e)) => {
            assert_eq!(e.group_id, receipt.group_id);
            assert_eq!(e.funding_amount, 200_000);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn test_deployment_with_custom_disbursement() {
    init_tracing();
    let deployer = principal(1);
    let beneficiary = principal(2);
    let config = ContractConfig::from_json(r#"{"disbursement_amount": 1000}"#).unwrap();

    let mut ledger = SandboxLedger::with_default_params();
    ledger.fund(deployer, 10_000_000).unwrap();
    let app_id = ledger.create_application();
    let asset = ledger
        .create_asset(deployer, benefit_token(app_id.address(), deployer))
        .unwrap();

    let mut contract = BenefitsContract::with_config(app_id, config).unwrap();
    let admin = CallContext::new(deployer);
    contract.create_application(&admin, asset).unwrap();
    let funding = PaymentTxn::new(deployer, contract.app_address(), 200_000);
    contract.opt_in_to_asset(&mut ledger, &admin, funding).unwrap();
    let stock = AssetTransfer::new(asset, deployer, contract.app_address(), CONTRACT_STOCK);
    ledger
        .execute_group(&[deployer], vec![Effect::AssetTransfer(stock)])
        .unwrap();
    opt_in(&mut ledger, beneficiary, asset);

    contract
        .claim_benefits(&mut ledger, &admin, beneficiary, "ok".into())
        .unwrap();

    let held = ledger.asset_balance(&beneficiary, asset).unwrap();
    assert_eq!(held, 1000);
    let display = ledger.asset_params(asset).unwrap().display_amount(held).unwrap();
    assert_eq!(display.to_string(), "10.00");
}

#[test]
fn test_sponsor_funds_opt_in_as_co_signer() {
    init_tracing();
    let deployer = principal(1);
    let sponsor = principal(3);

    let mut ledger = SandboxLedger::with_default_params();
    ledger.fund(deployer, 10_000_000).unwrap();
    ledger.fund(sponsor, 1_000_000).unwrap();
    let app_id = ledger.create_application();
    let asset = ledger
        .create_asset(deployer, benefit_token(app_id.address(), deployer))
        .unwrap();
    let mut contract = BenefitsContract::new(app_id);
    contract
        .create_application(&CallContext::new(deployer), asset)
        .unwrap();

    let funding = PaymentTxn::new(sponsor, contract.app_address(), 200_000);
    let ctx = CallContext::new(deployer).with_co_signer(sponsor);
    contract.opt_in_to_asset(&mut ledger, &ctx, funding).unwrap();

    assert_eq!(ledger.balance(&sponsor), 800_000);
    assert_eq!(ledger.balance(&deployer), 10_000_000);
    assert_eq!(contract.custody_status(&ledger), CustodyStatus::Holding);
}

#[test]
fn test_beneficiary_must_be_opted_in() {
    init_tracing();
    let deployer = principal(1);
    let beneficiary = principal(2);

    let mut ledger = SandboxLedger::with_default_params();
    ledger.fund(deployer, 10_000_000).unwrap();
    let app_id = ledger.create_application();
    let asset = ledger
        .create_asset(deployer, benefit_token(app_id.address(), deployer))
        .unwrap();
    let mut contract = BenefitsContract::new(app_id);
    let admin = CallContext::new(deployer);
    contract.create_application(&admin, asset).unwrap();
    let funding = PaymentTxn::new(deployer, contract.app_address(), 200_000);
    contract.opt_in_to_asset(&mut ledger, &admin, funding).unwrap();
    let stock = AssetTransfer::new(asset, deployer, contract.app_address(), CONTRACT_STOCK);
    ledger
        .execute_group(&[deployer], vec![Effect::AssetTransfer(stock)])
        .unwrap();

    let result = contract.claim_benefits(&mut ledger, &admin, beneficiary, "ok".into());
    assert!(result.is_err());
    assert_eq!(
        ledger.asset_balance(&contract.app_address(), asset),
        Some(CONTRACT_STOCK)
    );
}
