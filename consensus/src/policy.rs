//! Split of voting power between internal and external slots.

use serde::{Deserialize, Serialize};
use votepower_types::Dec;

use crate::error::VotePowerError;

/// The two top-level shares of voting power. They always sum to one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SharePolicy {
    internal_share: Dec,
    external_share: Dec,
}

impl SharePolicy {
    /// Build a policy, rejecting negative shares or shares that do not sum to one.
    pub fn new(internal_share: Dec, external_share: Dec) -> Result<Self, VotePowerError> {
        if internal_share.is_negative() || external_share.is_negative() {
            return Err(VotePowerError::InvalidPolicy(format!(
                "shares must be non-negative, got internal {internal_share} and external {external_share}"
            )));
        }
        let total = &internal_share + &external_share;
        if total != Dec::one() {
            return Err(VotePowerError::InvalidPolicy(format!(
                "shares must sum to one, got {total}"
            )));
        }
        Ok(Self {
            internal_share,
            external_share,
        })
    }

    /// 68% internal, 32% external.
    pub fn reference() -> Self {
        Self {
            internal_share: Dec::with_prec(68, 2),
            external_share: Dec::with_prec(32, 2),
        }
    }

    pub fn internal_share(&self) -> &Dec {
        &self.internal_share
    }

    pub fn external_share(&self) -> &Dec {
        &self.external_share
    }
}

impl Default for SharePolicy {
    fn default() -> Self {
        Self::reference()
    }
}
