//! Slot builders shared by the unit tests.

use votepower_types::address::ADDRESS_LEN;
use votepower_types::keys::BLS_PUBLIC_KEY_LEN;
use votepower_types::{BlsPublicKey, Dec, EcdsaAddress, Slot};

pub fn dec(s: &str) -> Dec {
    s.parse().unwrap()
}

pub fn key(n: u8) -> BlsPublicKey {
    BlsPublicKey::new([n; BLS_PUBLIC_KEY_LEN])
}

pub fn addr(n: u8) -> EcdsaAddress {
    EcdsaAddress::new([n; ADDRESS_LEN])
}

pub fn internal(n: u8) -> Slot {
    Slot::internal(addr(n), key(n))
}

pub fn external(n: u8, stake: &str) -> Slot {
    Slot::external(addr(n), key(n), dec(stake))
}
