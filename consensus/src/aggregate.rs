//! First pass: classify slots and total up the external stake.

use votepower_types::{Dec, Slot};

/// Totals gathered by one scan over the slot list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregate {
    /// Sum of the stakes of all external slots.
    pub total_external_stake: Dec,
    /// Number of slots without a stake.
    pub internal_slot_count: u64,
}

/// Scan `slots` once. Stakes are summed as given; their sign is checked
/// during allocation.
pub fn aggregate(slots: &[Slot]) -> Aggregate {
    let mut totals = Aggregate::default();
    for slot in slots {
        match &slot.total_stake {
            Some(stake) => {
                totals.total_external_stake = &totals.total_external_stake + stake;
            }
            None => totals.internal_slot_count += 1,
        }
    }
    tracing::debug!(
        slots = slots.len(),
        internal_slots = totals.internal_slot_count,
        total_external_stake = %totals.total_external_stake,
        "aggregated slot list"
    );
    totals
}
