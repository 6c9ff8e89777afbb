//! Committee slots as read from a shard-state snapshot.
//!
//! A slot without a stake is operated by the network itself and gets a fixed
//! share of voting power. A slot with a stake is an external validator and
//! gets a share proportional to its stake.

use serde::{Deserialize, Serialize};

use crate::address::EcdsaAddress;
use crate::error::TypesError;
use crate::keys::BlsPublicKey;
use crate::numeric::Dec;

/// One validator seat in a shard committee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "ecdsa-address")]
    pub ecdsa_address: EcdsaAddress,
    #[serde(rename = "bls-pubkey")]
    pub bls_public_key: BlsPublicKey,
    /// `None` marks an internal slot.
    #[serde(rename = "total-stake", default, skip_serializing_if = "Option::is_none")]
    pub total_stake: Option<Dec>,
}

/// Ordered slot list; order decides which external voter absorbs rounding.
pub type SlotList = Vec<Slot>;

impl Slot {
    /// A fixed-share slot with no stake.
    pub fn internal(ecdsa_address: EcdsaAddress, bls_public_key: BlsPublicKey) -> Self {
        Self {
            ecdsa_address,
            bls_public_key,
            total_stake: None,
        }
    }

    /// A staked slot.
    pub fn external(
        ecdsa_address: EcdsaAddress,
        bls_public_key: BlsPublicKey,
        total_stake: Dec,
    ) -> Self {
        Self {
            ecdsa_address,
            bls_public_key,
            total_stake: Some(total_stake),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.total_stake.is_none()
    }
}

/// Parse a snapshot document: a JSON array of slots.
pub fn from_json(s: &str) -> Result<SlotList, TypesError> {
    serde_json::from_str(s).map_err(|e| TypesError::Snapshot(e.to_string()))
}
