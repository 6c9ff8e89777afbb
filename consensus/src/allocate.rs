//! Second pass: one voter per slot with its share of voting power.
//!
//! Internal slots split the internal share equally. External slots split the
//! external share in proportion to stake. The last external slot in input
//! order is remembered so the finalizer can hand it the rounding remainder;
//! it is tracked here, during the ordered pass, because the voter map has no
//! order of its own.

use std::collections::HashMap;

use votepower_types::{BlsPublicKey, Dec, Slot};

use crate::aggregate::Aggregate;
use crate::error::{MalformedInput, VotePowerError};
use crate::policy::SharePolicy;
use crate::roster::Voter;

/// Per-slot voters and running totals, before rounding correction.
#[derive(Clone, Debug)]
pub struct Allocation {
    pub voters: HashMap<BlsPublicKey, Voter>,
    /// Total held by internal voters.
    pub ours: Dec,
    /// Total held by external voters.
    pub theirs: Dec,
    /// Identity of the last external slot in input order.
    pub last_external: Option<BlsPublicKey>,
}

/// Build one [`Voter`] per slot.
///
/// Fails on a duplicate identity, a non-positive stake, or a zero divisor.
pub fn allocate(
    slots: &[Slot],
    totals: &Aggregate,
    policy: &SharePolicy,
) -> Result<Allocation, VotePowerError> {
    let mut voters = HashMap::with_capacity(slots.len());
    let mut ours = Dec::zero();
    let mut theirs = Dec::zero();
    let mut last_external = None;

    for slot in slots {
        let identity = slot.bls_public_key;
        let voter = match &slot.total_stake {
            Some(stake) => {
                if !stake.is_positive() {
                    tracing::warn!(identity = %identity, stake = %stake, "non-positive stake on external slot");
                    return Err(MalformedInput::NonPositiveStake {
                        identity,
                        stake: stake.clone(),
                    }
                    .into());
                }
                let percent = stake
                    .checked_quo(&totals.total_external_stake)
                    .ok_or(MalformedInput::ZeroExternalStake)?
                    .mul_dec(policy.external_share());
                theirs = &theirs + &percent;
                last_external = Some(identity);
                Voter::external(slot, stake.clone(), percent)
            }
            None => {
                let percent = policy
                    .internal_share()
                    .checked_quo_int(totals.internal_slot_count)
                    .ok_or(MalformedInput::ZeroInternalSlotCount)?;
                ours = &ours + &percent;
                Voter::internal(slot, percent)
            }
        };

        if voters.insert(identity, voter).is_some() {
            tracing::warn!(identity = %identity, "duplicate identity in slot list");
            return Err(MalformedInput::DuplicateIdentity(identity).into());
        }
    }

    Ok(Allocation {
        voters,
        ours,
        theirs,
        last_external,
    })
}
