//! Security primitives for the custody contract
//!
//! Access control is a single admin principal, assigned once and never
//! rotated. Eligibility proofs cross the contract untouched: the contract
//! decides who may trigger a disbursement, not who deserves one.

use benefit_types::ids::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single-admin access control.
///
/// Starts unassigned; nobody is admin until [`AccessControl::assign`]
/// succeeds, and it succeeds at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessControl {
    admin: Option<Address>,
}

impl AccessControl {
    /// Create access control with no admin.
    pub fn new() -> Self {
        Self { admin: None }
    }

    /// Access control with `admin` already assigned.
    pub fn with_admin(admin: Address) -> Self {
        Self { admin: Some(admin) }
    }

    /// Assign the admin. Returns `false` if an admin is already assigned.
    pub fn assign(&mut self, admin: Address) -> bool {
        if self.admin.is_some() {
            return false;
        }
        self.admin = Some(admin);
        true
    }

    /// Check if a caller is admin.
    pub fn is_admin(&self, caller: &Address) -> bool {
        self.admin.as_ref() == Some(caller)
    }

    /// Get the admin, if assigned.
    pub fn admin(&self) -> Option<&Address> {
        self.admin.as_ref()
    }
}

/// Opaque eligibility proof supplied alongside a disbursement.
///
/// Produced and checked by an upstream verification step. The contract
/// carries it into the disbursement event and never inspects it.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EligibilityProof(Vec<u8>);

impl EligibilityProof {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for EligibilityProof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EligibilityProof({} bytes)", self.0.len())
    }
}

impl From<&str> for EligibilityProof {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for EligibilityProof {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<Vec<u8>> for EligibilityProof {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}
