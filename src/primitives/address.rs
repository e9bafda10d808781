// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use bincode::{Decode, Encode};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

lazy_static! {
    /// Surface grammar for legacy/testnet style addresses: a version
    /// character in {1, 2, 3} followed by 25 to 34 Base58 characters.
    /// Checksums are not verified.
    static ref ADDRESS_RE: Regex = Regex::new(r"^[123][a-km-zA-HJ-NP-Z1-9]{25,34}$").unwrap();
}

/// A Bitcoin testnet address, checked for surface syntax only.
#[derive(Clone, PartialEq, Eq, Hash, Encode, Decode)]
pub struct TestnetAddress(String);

impl TestnetAddress {
    pub fn parse(encoded: &str) -> Result<Self, &'static str> {
        if !ADDRESS_RE.is_match(encoded) {
            return Err("invalid address format");
        }

        Ok(Self(encoded.to_owned()))
    }

    /// Grammar check without constructing an address. Used by the
    /// submission validator and the standalone rpc call.
    #[must_use]
    pub fn is_valid(encoded: &str) -> bool {
        ADDRESS_RE.is_match(encoded)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TestnetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for TestnetAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TestnetAddress").field(&self.0).finish()
    }
}

impl Serialize for TestnetAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        String::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for TestnetAddress {
    fn deserialize<D>(deserializer: D) -> Result<TestnetAddress, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        TestnetAddress::parse(&string).map_err(|err| serde::de::Error::custom(err.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    const BASE58: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

    #[test]
    fn accepts_legacy_mainnet_shape() {
        assert!(TestnetAddress::parse("1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").is_ok());
    }

    #[test]
    fn accepts_p2sh_testnet_shape() {
        assert!(TestnetAddress::parse("2N7DoD1edbhWw1Z1rN7HbpvzjPvF9LKjPbE").is_ok());
    }

    #[test]
    fn rejects_bad_version_byte() {
        assert!(TestnetAddress::parse("0InvalidAddress").is_err());
    }

    #[test]
    fn rejects_too_short() {
        assert!(TestnetAddress::parse("short1").is_err());
    }

    #[test]
    fn rejects_ambiguous_characters() {
        // 0, O, I and l are excluded from the Base58 alphabet
        assert!(TestnetAddress::parse("1A1zP1eP5QGefi2DMPTfTL5SLmv70ivfNa").is_err());
        assert!(TestnetAddress::parse("1A1zP1eP5QGefi2DMPTfTL5SLmv7OivfNa").is_err());
        assert!(TestnetAddress::parse("1A1zP1eP5QGefi2DMPTfTL5SLmv7IivfNa").is_err());
        assert!(TestnetAddress::parse("1A1zP1eP5QGefi2DMPTfTL5SLmv7livfNa").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(TestnetAddress::parse("").is_err());
    }

    #[test]
    fn display_round_trips_input() {
        let encoded = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
        let address = TestnetAddress::parse(encoded).unwrap();
        assert_eq!(address.to_string(), encoded);
        assert_eq!(address.as_str(), encoded);
    }

    #[test]
    fn deserialize_validates() {
        assert!(serde_json::from_str::<TestnetAddress>("\"short1\"").is_err());
        assert!(
            serde_json::from_str::<TestnetAddress>("\"2N7DoD1edbhWw1Z1rN7HbpvzjPvF9LKjPbE\"")
                .is_ok()
        );
    }

    #[quickcheck]
    fn grammar_accepts_base58_payloads(body: Vec<u8>) -> TestResult {
        if body.len() < 25 || body.len() > 34 {
            return TestResult::discard();
        }

        let body: String = body
            .iter()
            .map(|b| BASE58[*b as usize % BASE58.len()] as char)
            .collect();
        TestResult::from_bool(TestnetAddress::parse(&format!("1{body}")).is_ok())
    }

    #[quickcheck]
    fn grammar_rejects_out_of_range_lengths(body: Vec<u8>) -> TestResult {
        if (25..=34).contains(&body.len()) {
            return TestResult::discard();
        }

        let body: String = body
            .iter()
            .map(|b| BASE58[*b as usize % BASE58.len()] as char)
            .collect();
        TestResult::from_bool(TestnetAddress::parse(&format!("1{body}")).is_err())
    }
}
