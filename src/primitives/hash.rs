// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use bincode::{Decode, Encode};
use std::fmt;
use std::hash::Hash as HashTrait;

const HASH_KEY_PREFIX: &str = "openfunds.hash.256.";

#[derive(PartialEq, Eq, Encode, Decode, Clone, HashTrait, PartialOrd, Ord, Default, Copy)]
pub struct Hash256(pub [u8; 32]);

impl Hash256 {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn zero() -> Self {
        Self([0; 32])
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(hexstr: &str) -> Result<Self, &'static str> {
        let bytes = hex::decode(hexstr).map_err(|_| "invalid hexstr")?;

        if bytes.len() != 32 {
            return Err("invalid slice length! expected 32");
        }

        let mut out = Self::zero();
        out.0.copy_from_slice(&bytes);
        Ok(out)
    }

    /// Keyed hash of the given slice. The key is namespaced under the
    /// crate-wide prefix so digests from different call sites never collide.
    #[inline]
    pub fn hash_from_slice<T: AsRef<[u8]>>(slice: T, key: &str) -> Self {
        let mut out_hash = Hash256([0; 32]);
        let key = [HASH_KEY_PREFIX, key].concat();
        let mut hasher = blake3::Hasher::new_derive_key(&key);
        hasher.update(slice.as_ref());
        let mut out = hasher.finalize_xof();
        out.fill(&mut out_hash.0);
        out_hash
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hash256").field(&self.to_hex()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let a = Hash256::hash_from_slice("community garden", "campaign.id");
        let b = Hash256::hash_from_slice("community garden", "campaign.id");
        assert_eq!(a, b);
    }

    #[test]
    fn hash_keys_are_domain_separated() {
        let a = Hash256::hash_from_slice("community garden", "campaign.id");
        let b = Hash256::hash_from_slice("community garden", "basic_auth");
        assert_ne!(a, b);
    }

    #[test]
    fn hex_round_trip() {
        let hash = Hash256::hash_from_slice("", "");
        assert_eq!(Hash256::from_hex(&hash.to_hex()).unwrap(), hash);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Hash256::from_hex("deadbeef").is_err());
        assert!(Hash256::from_hex("not hex at all").is_err());
    }
}
