//! Third pass: absorb the rounding remainder and enforce the sum-to-one invariant.

use votepower_types::Dec;

use crate::aggregate::Aggregate;
use crate::allocate::Allocation;
use crate::error::VotePowerError;
use crate::roster::{Correction, Roster};

/// Turn an [`Allocation`] into a [`Roster`] whose percentages sum to exactly one.
///
/// Any difference between one and the allocated total goes to the last
/// external voter in input order. With no external voter nothing can absorb
/// it and the roster is rejected; internal voters are never topped up.
pub fn finalize(allocation: Allocation, totals: &Aggregate) -> Result<Roster, VotePowerError> {
    let Allocation {
        mut voters,
        ours,
        mut theirs,
        last_external,
    } = allocation;

    let one = Dec::one();
    let diff = &one - &(&ours + &theirs);
    let mut correction = None;

    if let Some(recipient) = last_external.filter(|_| !diff.is_zero()) {
        if let Some(voter) = voters.get_mut(&recipient) {
            voter.effective_percent = &voter.effective_percent + &diff;
            theirs = &theirs + &diff;
            tracing::info!(
                diff = %diff,
                recipient = %recipient,
                "voting power of internal and external slots not equal to one, gave diff to last external slot"
            );
            correction = Some(Correction { recipient, diff });
        }
    }

    if &ours + &theirs != one {
        tracing::error!(
            ours = %ours,
            theirs = %theirs,
            "total voting power not equal to one"
        );
        return Err(VotePowerError::VotingPowerInvariantViolated { ours, theirs });
    }

    Ok(Roster {
        voters,
        internal_total_percentage: ours,
        external_total_percentage: theirs,
        raw_staked_total: totals.total_external_stake.clone(),
        internal_slot_count: totals.internal_slot_count,
        correction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::allocate::allocate;
    use crate::policy::SharePolicy;
    use crate::test_utils::{dec, external, internal, key};
    use std::collections::HashMap;
    use votepower_types::Slot;

    fn run(slots: &[Slot]) -> Result<Roster, VotePowerError> {
        let totals = aggregate(slots);
        let allocation = allocate(slots, &totals, &SharePolicy::reference())?;
        finalize(allocation, &totals)
    }

    #[test]
    fn exact_allocation_needs_no_correction() {
        let roster =
            run(&[internal(1), internal(2), external(3, "60"), external(4, "40")]).unwrap();
        assert!(roster.correction().is_none());
        assert_eq!(roster.total_percentage(), Dec::one());
    }

    #[test]
    fn remainder_goes_to_last_external_voter() {
        // 1/3 * 0.32 rounds up to 0.106666666666666667, three of them overshoot by 1e-18.
        let roster =
            run(&[internal(1), external(2, "1"), external(3, "1"), external(4, "1")]).unwrap();

        let correction = roster.correction().unwrap();
        assert_eq!(correction.recipient, key(4));
        assert_eq!(correction.diff, dec("-0.000000000000000001"));

        let percent = |k| roster.voter(&key(k)).unwrap().effective_percent.clone();
        assert_eq!(percent(2), dec("0.106666666666666667"));
        assert_eq!(percent(3), dec("0.106666666666666667"));
        assert_eq!(percent(4), dec("0.106666666666666666"));
        assert_eq!(roster.external_total_percentage(), &dec("0.32"));
        assert_eq!(roster.internal_total_percentage(), &dec("0.68"));
    }

    #[test]
    fn internal_only_fails_the_invariant() {
        let err = run(&[internal(1), internal(2)]).unwrap_err();
        match err {
            VotePowerError::VotingPowerInvariantViolated { ours, theirs } => {
                assert_eq!(ours, dec("0.68"));
                assert!(theirs.is_zero());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_input_fails_the_invariant() {
        let err = run(&[]).unwrap_err();
        assert!(matches!(
            err,
            VotePowerError::VotingPowerInvariantViolated { ours, theirs }
                if ours.is_zero() && theirs.is_zero()
        ));
    }

    #[test]
    fn missing_target_is_not_corrected() {
        // A target that is not in the voter map is ignored, the check still runs.
        let allocation = Allocation {
            voters: HashMap::new(),
            ours: dec("0.5"),
            theirs: dec("0.4"),
            last_external: Some(key(7)),
        };
        assert!(matches!(
            finalize(allocation, &Aggregate::default()),
            Err(VotePowerError::VotingPowerInvariantViolated { .. })
        ));
    }

    #[test]
    fn aggregates_are_carried_into_roster() {
        let roster = run(&[internal(1), external(2, "60"), external(3, "40")]).unwrap();
        assert_eq!(roster.raw_staked_total(), &Dec::from_int(100));
        assert_eq!(roster.internal_slot_count(), 1);
        assert_eq!(roster.len(), 3);
    }
}
