//! Smart Contract Logic for Benefit Custody
//!
//! This crate implements an admin-gated custody contract for a single
//! fungible benefit asset: one-time creation, funded opt-in, fixed
//! disbursement to beneficiaries, and clawback to the admin.
//!
//! # Modules
//! - `config`: Contract configuration (disbursement amount)
//! - `errors`: Contract, ledger and config error types
//! - `events`: Contract events emitted on successful operations
//! - `security`: Single-admin access control and opaque eligibility proofs
//! - `ledger`: Execution environment seam (effects, groups, call context)
//! - `sandbox`: In-memory ledger implementation
//! - `state`: Persisted global state and commitment hash
//! - `custody`: The benefits contract itself

pub mod config;
pub mod errors;
pub mod events;
pub mod security;
pub mod ledger;
pub mod sandbox;
pub mod state;
pub mod custody;

/// Contract ABI version, frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";

/// ABI method names, in deployment order
pub const ABI_METHODS: [&str; 4] = [
    "create_application",
    "opt_in_to_asset",
    "claim_benefits",
    "clawback_benefits",
];
