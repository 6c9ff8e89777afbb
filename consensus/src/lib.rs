//! Voting-power roster — how much of a BFT quorum each committee slot holds.
//!
//! Internal slots (operated by the network, no stake) share a fixed part of
//! the voting power equally. External slots (staked validators) share the
//! rest in proportion to stake. The result is normalised so every node
//! derives the same percentages, summing to exactly one, from the same slot
//! list.
//!
//! ## Module overview
//!
//! - [`aggregate`] — first pass: internal slot count and total external stake.
//! - [`allocate`] — second pass: one [`Voter`] per slot.
//! - [`finalize`] — rounding correction and the sum-to-one check.
//! - [`roster`] — the resulting [`Roster`].
//! - [`policy`] — the internal/external share split.
//! - [`config`] — TOML configuration.
//! - [`error`] — error types.

pub mod aggregate;
pub mod allocate;
pub mod config;
pub mod error;
pub mod finalize;
pub mod policy;
pub mod roster;

#[cfg(test)]
mod test_utils;

pub use aggregate::{aggregate, Aggregate};
pub use allocate::{allocate, Allocation};
pub use config::{LoggingConfig, PolicyConfig, VotePowerConfig};
pub use error::{MalformedInput, VotePowerError};
pub use finalize::finalize;
pub use policy::SharePolicy;
pub use roster::{Correction, Roster, Voter};
