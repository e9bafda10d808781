// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use crate::primitives::{Campaign, CampaignId};
use crate::store::{CampaignStore, StoreErr};
use rocksdb::{IteratorMode, MultiThreaded, TransactionDB};
use triomphe::Arc;

pub type DB = TransactionDB<MultiThreaded>;

pub const CAMPAIGNS_CF: &str = "campaigns";

/// Disk backed campaign store over `RocksDB`. Writes go through the
/// transaction layer so a concurrent writer on the same database file
/// cannot interleave partial records.
#[derive(Clone)]
pub struct DiskBackend {
    db: Arc<DB>,
}

impl DiskBackend {
    #[must_use]
    pub fn new(db: Arc<DB>) -> Self {
        Self { db }
    }
}

impl CampaignStore for DiskBackend {
    fn write_campaign(&self, campaign: &Campaign) -> Result<(), StoreErr> {
        let campaigns_cf = self
            .db
            .cf_handle(CAMPAIGNS_CF)
            .ok_or(StoreErr::Error("missing campaigns column family"))?;
        let tx = self.db.transaction();
        tx.put_cf(
            &campaigns_cf,
            campaign.id.as_bytes(),
            crate::codec::encode_to_vec(campaign)?,
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_campaign(&self, id: &CampaignId) -> Result<Option<Campaign>, StoreErr> {
        let campaigns_cf = self
            .db
            .cf_handle(CAMPAIGNS_CF)
            .ok_or(StoreErr::Error("missing campaigns column family"))?;
        match self.db.get_cf(&campaigns_cf, id.as_bytes())? {
            Some(bytes) => {
                let campaign = crate::codec::decode(&bytes).map_err(|_| StoreErr::CorruptData)?;
                Ok(Some(campaign))
            }
            None => Ok(None),
        }
    }

    fn list_all(&self) -> Result<Vec<Campaign>, StoreErr> {
        let campaigns_cf = self
            .db
            .cf_handle(CAMPAIGNS_CF)
            .ok_or(StoreErr::Error("missing campaigns column family"))?;
        let mut out = Vec::new();
        for entry in self.db.iterator_cf(&campaigns_cf, IteratorMode::Start) {
            let (_key, bytes) = entry?;
            out.push(crate::codec::decode(&bytes).map_err(|_| StoreErr::CorruptData)?);
        }
        Ok(out)
    }
}
