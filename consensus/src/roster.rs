//! The voting-power roster of one committee snapshot.
//!
//! A roster maps every slot's identity to the share of voting power it holds.
//! Shares always add up to exactly one; a roster that would not is never
//! returned. Rosters are built fresh for each snapshot and never mutated.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use votepower_types::{BlsPublicKey, Dec, EcdsaAddress, Slot};

use crate::aggregate::aggregate;
use crate::allocate::allocate;
use crate::error::VotePowerError;
use crate::finalize::finalize;
use crate::policy::SharePolicy;

/// Voting power held by one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub is_active: bool,
    /// `true` for slots without stake.
    pub is_internal: bool,
    pub earning_account: EcdsaAddress,
    pub identity: BlsPublicKey,
    /// Zero for internal voters.
    pub raw_stake: Dec,
    pub effective_percent: Dec,
}

impl Voter {
    pub(crate) fn internal(slot: &Slot, effective_percent: Dec) -> Self {
        Self {
            is_active: true,
            is_internal: true,
            earning_account: slot.ecdsa_address,
            identity: slot.bls_public_key,
            raw_stake: Dec::zero(),
            effective_percent,
        }
    }

    pub(crate) fn external(slot: &Slot, raw_stake: Dec, effective_percent: Dec) -> Self {
        Self {
            is_active: true,
            is_internal: false,
            earning_account: slot.ecdsa_address,
            identity: slot.bls_public_key,
            raw_stake,
            effective_percent,
        }
    }
}

/// Rounding remainder handed to the last external voter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub recipient: BlsPublicKey,
    /// Signed amount added to the recipient's share.
    pub diff: Dec,
}

#[derive(Clone, Debug, Serialize)]
pub struct Roster {
    pub(crate) voters: HashMap<BlsPublicKey, Voter>,
    pub(crate) internal_total_percentage: Dec,
    pub(crate) external_total_percentage: Dec,
    pub(crate) raw_staked_total: Dec,
    pub(crate) internal_slot_count: u64,
    pub(crate) correction: Option<Correction>,
}

impl Roster {
    /// Compute the roster for `slots` under `policy`.
    ///
    /// Slot order matters only for which external voter absorbs the rounding
    /// remainder.
    pub fn compute(slots: &[Slot], policy: &SharePolicy) -> Result<Self, VotePowerError> {
        let totals = aggregate(slots);
        let allocation = allocate(slots, &totals, policy)?;
        finalize(allocation, &totals)
    }

    pub fn voters(&self) -> &HashMap<BlsPublicKey, Voter> {
        &self.voters
    }

    pub fn voter(&self, identity: &BlsPublicKey) -> Option<&Voter> {
        self.voters.get(identity)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn internal_voters(&self) -> impl Iterator<Item = &Voter> {
        self.voters.values().filter(|v| v.is_internal)
    }

    pub fn external_voters(&self) -> impl Iterator<Item = &Voter> {
        self.voters.values().filter(|v| !v.is_internal)
    }

    pub fn internal_total_percentage(&self) -> &Dec {
        &self.internal_total_percentage
    }

    pub fn external_total_percentage(&self) -> &Dec {
        &self.external_total_percentage
    }

    /// Always exactly one.
    pub fn total_percentage(&self) -> Dec {
        &self.internal_total_percentage + &self.external_total_percentage
    }

    /// Sum of the stakes of all external voters.
    pub fn raw_staked_total(&self) -> &Dec {
        &self.raw_staked_total
    }

    pub fn internal_slot_count(&self) -> u64 {
        self.internal_slot_count
    }

    /// The remainder correction, if one was applied.
    pub fn correction(&self) -> Option<&Correction> {
        self.correction.as_ref()
    }
}
