// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use crate::primitives::{Campaign, CampaignId, TestnetAddress};
use crate::store::disk::DB;
use crate::validation::CampaignDraft;
use bincode::error::{DecodeError as BincodeDecodeErr, EncodeError as BincodeEncodeErr};
use rocksdb::Error as RocksDBErr;
use rocksdb::{ColumnFamilyDescriptor, LogLevel, Options, TransactionDBOptions};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use triomphe::Arc;

/// Trait for campaign state backends.
///
/// The record set is append only: a campaign is written exactly once at
/// creation and afterwards only read. Backends must therefore never
/// overwrite or drop records on reopening an existing store.
pub trait CampaignStore: Sized + Clone {
    /// Writes a campaign record. Assumes all validations have passed.
    fn write_campaign(&self, campaign: &Campaign) -> Result<(), StoreErr>;

    /// Returns the campaign with the given id if one was ever created.
    fn get_campaign(&self, id: &CampaignId) -> Result<Option<Campaign>, StoreErr>;

    /// Returns every stored campaign. Order follows the backend's key
    /// order and carries no meaning. Empty store, empty vec.
    fn list_all(&self) -> Result<Vec<Campaign>, StoreErr>;

    /// Builds a record out of a validated draft and persists it: assigns a
    /// fresh unique id, zeroes the current amount and writes. Returns the
    /// record as stored.
    fn create(&self, draft: &CampaignDraft) -> Result<Campaign, StoreErr> {
        let btc_address = TestnetAddress::parse(&draft.btc_address)
            .map_err(|_| StoreErr::Error("draft did not pass validation"))?;

        let mut id = CampaignId::generate();
        while self.get_campaign(&id)?.is_some() {
            id = CampaignId::generate();
        }

        let campaign = Campaign {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            btc_address,
            target_amount: draft.target_amount,
            current_amount: 0.0,
            owner_name: draft.owner_name.clone(),
        };
        self.write_campaign(&campaign)?;
        Ok(campaign)
    }

    /// Returns the number of campaigns and the sum of their current
    /// amounts, computed by scanning the full record set.
    fn aggregate_totals(&self) -> Result<(u64, f64), StoreErr> {
        let campaigns = self.list_all()?;
        let count = campaigns.len() as u64;
        let total = campaigns.iter().map(|c| c.current_amount).sum();
        Ok((count, total))
    }
}

#[derive(Debug)]
pub enum StoreErr {
    /// Backend data is corrupted
    CorruptData,

    /// Rocksdb error
    RocksDB(RocksDBErr),

    /// Bincode encode error
    BincodeEncode(BincodeEncodeErr),

    /// Bincode decode error
    BincodeDecode(BincodeDecodeErr),

    /// Generic error
    Error(&'static str),
}

impl fmt::Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CorruptData => write!(f, "store data is corrupted"),
            Self::RocksDB(err) => write!(f, "rocksdb error: {err}"),
            Self::BincodeEncode(err) => write!(f, "encode error: {err}"),
            Self::BincodeDecode(err) => write!(f, "decode error: {err}"),
            Self::Error(err) => write!(f, "{err}"),
        }
    }
}

impl From<RocksDBErr> for StoreErr {
    fn from(other: RocksDBErr) -> Self {
        Self::RocksDB(other)
    }
}

impl From<BincodeEncodeErr> for StoreErr {
    fn from(other: BincodeEncodeErr) -> Self {
        Self::BincodeEncode(other)
    }
}

impl From<BincodeDecodeErr> for StoreErr {
    fn from(other: BincodeDecodeErr) -> Self {
        Self::BincodeDecode(other)
    }
}

/// Opens the campaign database at the configured data directory, creating
/// the database and its column families on first use. Reopening an
/// existing database leaves its record set untouched.
#[must_use]
pub fn create_rocksdb_backend() -> Arc<DB> {
    #[cfg(not(test))]
    let mut path = PathBuf::from_str(&crate::settings::SETTINGS.node.data_dir).unwrap();

    #[cfg(test)]
    let mut path = {
        use rand::Rng;
        let mut path = std::env::temp_dir();
        path.push(hex::encode(rand::thread_rng().gen::<[u8; 32]>()));
        path.push("OpenFunds");
        path
    };

    path.push(&crate::settings::SETTINGS.node.network_name);
    path.push("data");

    open_rocksdb_backend(path)
}

/// Opens (or creates) the campaign database at an explicit path.
#[must_use]
pub fn open_rocksdb_backend(path: PathBuf) -> Arc<DB> {
    let mut cf_opts = Options::default();
    cf_opts.set_max_write_buffer_number(3);
    let cfs = vec![ColumnFamilyDescriptor::new(
        crate::store::disk::CAMPAIGNS_CF,
        cf_opts,
    )];

    let mut db_opts = Options::default();
    db_opts.create_missing_column_families(true);
    db_opts.create_if_missing(true);
    db_opts.set_log_level(LogLevel::Warn);
    db_opts.set_keep_log_file_num(1);
    let db =
        DB::open_cf_descriptors(&db_opts, &TransactionDBOptions::default(), path, cfs).unwrap();
    Arc::new(db)
}

pub mod disk;
pub mod memory;
