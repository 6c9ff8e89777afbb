use thiserror::Error;
use votepower_types::{BlsPublicKey, Dec};
use votepower_utils::LoggingError;

/// Slot lists that cannot produce a roster at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedInput {
    #[error("duplicate identity {0} in slot list")]
    DuplicateIdentity(BlsPublicKey),

    #[error("external slot {identity} has non-positive stake {stake}")]
    NonPositiveStake { identity: BlsPublicKey, stake: Dec },

    #[error("external slots present but total external stake is zero")]
    ZeroExternalStake,

    #[error("internal slots present but internal slot count is zero")]
    ZeroInternalSlotCount,
}

#[derive(Debug, Error)]
pub enum VotePowerError {
    #[error("voting power not equal to one: ours {ours}, theirs {theirs}")]
    VotingPowerInvariantViolated { ours: Dec, theirs: Dec },

    #[error("malformed slot list: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("invalid share policy: {0}")]
    InvalidPolicy(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
}
