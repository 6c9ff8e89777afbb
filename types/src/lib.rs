//! Fundamental types for voting-power computation.
//!
//! This crate defines the inputs every roster computation reads: the
//! deterministic decimal, voter identity keys, payout addresses and the slot
//! records of a shard committee snapshot.

pub mod address;
pub mod error;
pub mod keys;
pub mod numeric;
pub mod slot;

pub use address::EcdsaAddress;
pub use error::{ParseDecError, TypesError};
pub use keys::BlsPublicKey;
pub use numeric::Dec;
pub use slot::{Slot, SlotList};
