//! Types library for the benefit custody contract
//!
//! This library provides the identifiers and asset descriptions shared by the
//! contract crate and anything that drives it (tests, deployment tooling).
//!
//! # Modules
//! - `ids`: Principal addresses, asset and application identifiers
//! - `asset`: Fungible asset parameters (supply, decimals, role addresses)
//! - `numeric`: Base-unit to display-unit conversion

pub mod ids;
pub mod asset;
pub mod numeric;
