// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use crate::primitives::{Hash256, TestnetAddress};
use bincode::{Decode, Encode};
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier assigned to a campaign when it is first written to the store.
/// Never reused, never recycled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub struct CampaignId(pub Hash256);

impl CampaignId {
    /// Draws a fresh id. Ids are random nonces folded through the keyed
    /// hash so they share an id space with any future derived ids.
    #[must_use]
    pub fn generate() -> Self {
        let nonce: [u8; 32] = rand::thread_rng().gen();
        Self(Hash256::hash_from_slice(nonce, "campaign.id"))
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn from_hex(hexstr: &str) -> Result<Self, &'static str> {
        Hash256::from_hex(hexstr).map(Self)
    }
}

impl fmt::Debug for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CampaignId").field(&self.to_hex()).finish()
    }
}

impl Serialize for CampaignId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        String::serialize(&self.to_hex(), serializer)
    }
}

impl<'de> Deserialize<'de> for CampaignId {
    fn deserialize<D>(deserializer: D) -> Result<CampaignId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let string = String::deserialize(deserializer)?;
        CampaignId::from_hex(&string).map_err(|err| serde::de::Error::custom(err.to_owned()))
    }
}

/// A single fundraising request record.
///
/// Records are append-only: written once at creation, after the submission
/// has passed validation, and never mutated or deleted. `current_amount`
/// starts at zero and exists for donation tracking and the dashboard
/// aggregate; no contribution path writes to it yet.
#[derive(Debug, Clone, PartialEq, Encode, Decode, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub title: String,
    pub description: String,
    pub btc_address: TestnetAddress,
    pub target_amount: f64,
    pub current_amount: f64,
    pub owner_name: String,
}
