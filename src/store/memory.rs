// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use crate::primitives::{Campaign, CampaignId};
use crate::store::{CampaignStore, StoreErr};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use triomphe::Arc;

/// In-memory campaign store. Used when the node runs in memory only mode
/// and throughout the test suite. Nothing survives the process.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    campaigns: Arc<RwLock<BTreeMap<CampaignId, Campaign>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self {
            campaigns: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignStore for MemoryBackend {
    fn write_campaign(&self, campaign: &Campaign) -> Result<(), StoreErr> {
        self.campaigns.write().insert(campaign.id, campaign.clone());
        Ok(())
    }

    fn get_campaign(&self, id: &CampaignId) -> Result<Option<Campaign>, StoreErr> {
        Ok(self.campaigns.read().get(id).cloned())
    }

    fn list_all(&self) -> Result<Vec<Campaign>, StoreErr> {
        Ok(self.campaigns.read().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::CampaignDraft;

    fn sample_draft(title: &str) -> CampaignDraft {
        CampaignDraft {
            title: title.to_owned(),
            description: "Replace the broken irrigation pump.".to_owned(),
            btc_address: "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa".to_owned(),
            target_amount: 2.5,
            owner_name: "Garden Committee".to_owned(),
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        let backend = MemoryBackend::new();
        assert!(backend.list_all().unwrap().is_empty());
        assert_eq!(backend.aggregate_totals().unwrap(), (0, 0.0));
    }

    #[test]
    fn create_round_trips_all_fields() {
        let backend = MemoryBackend::new();
        let draft = sample_draft("Pump Replacement");
        let created = backend.create(&draft).unwrap();

        assert_eq!(created.title, draft.title);
        assert_eq!(created.description, draft.description);
        assert_eq!(created.btc_address.as_str(), draft.btc_address);
        assert_eq!(created.target_amount, draft.target_amount);
        assert_eq!(created.current_amount, 0.0);
        assert_eq!(created.owner_name, draft.owner_name);

        assert_eq!(backend.list_all().unwrap(), vec![created]);
    }

    #[test]
    fn aggregate_counts_every_record() {
        let backend = MemoryBackend::new();
        for i in 0..3 {
            backend.create(&sample_draft(&format!("Campaign {i}"))).unwrap();
        }
        assert_eq!(backend.aggregate_totals().unwrap(), (3, 0.0));
    }

    #[test]
    fn creates_assign_distinct_ids() {
        let backend = MemoryBackend::new();
        let mut ids = std::collections::HashSet::new();
        for i in 0..25 {
            ids.insert(backend.create(&sample_draft(&format!("{i}"))).unwrap().id);
        }
        assert_eq!(ids.len(), 25);
        assert_eq!(backend.list_all().unwrap().len(), 25);
    }

    #[test]
    fn create_rejects_unvalidated_address() {
        // `create` assumes a validated draft; a malformed address cannot be
        // turned into a record and must not reach the record set.
        let backend = MemoryBackend::new();
        let draft = CampaignDraft {
            btc_address: "0InvalidAddress".to_owned(),
            ..sample_draft("Bad Address")
        };
        assert!(backend.create(&draft).is_err());
        assert!(backend.list_all().unwrap().is_empty());
    }
}
