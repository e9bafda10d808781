// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use crate::primitives::{Campaign, TestnetAddress};
use crate::store::{CampaignStore, StoreErr};
use crate::validation::{validate_draft, CampaignDraft, ValidateErr};
use log::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::Ordering;

/// A single rpc call as posted to the local HTTP endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum RpcRequest {
    /// Validates the draft and, on success, persists a new campaign
    CreateCampaign(CampaignDraft),

    /// Returns every stored campaign
    ListCampaigns,

    /// Returns the dashboard aggregate: campaign count and total raised
    CampaignStats,

    /// Standalone address grammar check, used by the creation form
    ValidateAddress { address: String },

    /// Returns information about the node
    GetNodeInfo,

    /// Returns the number of seconds the server has been running
    Uptime,

    /// Attempts to gracefully shutdown OpenFunds
    Stop,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RpcResponse {
    Campaign(Campaign),
    Campaigns(Vec<Campaign>),
    Stats(CampaignStats),
    Valid(bool),
    NodeInfo(NodeInfo),
    Uptime(u64),
    Stopping,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RpcErr {
    /// The submission was rejected by the validator
    Validate(ValidateErr),

    /// The store could not persist or read records; the caller may retry
    Store(String),
}

impl From<ValidateErr> for RpcErr {
    fn from(other: ValidateErr) -> Self {
        Self::Validate(other)
    }
}

impl From<StoreErr> for RpcErr {
    fn from(other: StoreErr) -> Self {
        Self::Store(other.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CampaignStats {
    pub campaigns: u64,
    pub total_btc: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInfo {
    pub version: String,
    pub network_name: String,
    pub campaigns: u64,
}

/// RPC server over a campaign store backend.
#[derive(Clone)]
pub struct RpcServer<B: CampaignStore> {
    pub store: B,
}

impl<B: CampaignStore> RpcServer<B> {
    /// Runs a single rpc call against the store. Creation is the only
    /// write path and always runs the validator first; a draft that fails
    /// validation never reaches the store.
    pub fn dispatch(&self, request: RpcRequest) -> Result<RpcResponse, RpcErr> {
        match request {
            RpcRequest::CreateCampaign(draft) => {
                validate_draft(&draft)?;
                let campaign = self.store.create(&draft)?;
                info!(
                    "created campaign {} ({})",
                    campaign.id.to_hex(),
                    campaign.title
                );
                Ok(RpcResponse::Campaign(campaign))
            }

            RpcRequest::ListCampaigns => Ok(RpcResponse::Campaigns(self.store.list_all()?)),

            RpcRequest::CampaignStats => {
                let (campaigns, total_btc) = self.store.aggregate_totals()?;
                Ok(RpcResponse::Stats(CampaignStats {
                    campaigns,
                    total_btc,
                }))
            }

            RpcRequest::ValidateAddress { address } => {
                Ok(RpcResponse::Valid(TestnetAddress::is_valid(&address)))
            }

            RpcRequest::GetNodeInfo => {
                let (campaigns, _) = self.store.aggregate_totals()?;
                Ok(RpcResponse::NodeInfo(NodeInfo {
                    version: env!("CARGO_PKG_VERSION").to_owned(),
                    network_name: crate::settings::SETTINGS.node.network_name.clone(),
                    campaigns,
                }))
            }

            RpcRequest::Uptime => Ok(RpcResponse::Uptime(
                crate::global::STARTED_AT.elapsed().as_secs(),
            )),

            RpcRequest::Stop => {
                info!("rpc stop requested, shutting down");
                crate::global::EXIT_SIGNAL.store(true, Ordering::Relaxed);
                Ok(RpcResponse::Stopping)
            }
        }
    }
}
