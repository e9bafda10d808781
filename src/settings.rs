// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use config::{Config, ConfigError, File};
use lazy_static::*;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{create_dir_all, metadata, File as FsFile};
use std::io::Write;
use struct_field_names_as_array::FieldNamesAsArray;

lazy_static! {
    pub static ref SETTINGS: Settings = Settings::new().unwrap();
}

#[derive(Debug, Serialize, Deserialize, Default, FieldNamesAsArray)]
pub struct Settings {
    /// Network settings.
    pub network: Network,

    /// Node settings.
    pub node: Node,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut config_dir = dirs::config_dir().unwrap();
        config_dir.push("OpenFunds");
        let mut config_path = config_dir.clone();
        config_path.push("config.toml");
        let default_settings = Settings::default();
        if metadata(config_path.clone()).is_err() {
            // Create default configuration
            let settings_str = toml::ser::to_string_pretty(&default_settings).unwrap();

            let created = create_dir_all(&config_dir)
                .map_err(anyhow::Error::from)
                .and_then(|_| FsFile::create(config_path.clone()).map_err(anyhow::Error::from));

            match created {
                Ok(mut file) => {
                    file.write_all(settings_str.as_bytes()).unwrap_or(());
                }
                Err(err) => {
                    // If this fails, do nothing and fall back to environment variables
                    error!("Failed to create configuration! Reason: {:#?}", err);
                }
            }
        }

        let prefix = "openfunds";
        let env_source: Vec<_> = std::env::vars().collect();
        let mut s = Config::builder().add_source(
            File::with_name(&config_path.into_os_string().into_string().unwrap()).required(false),
        );

        // Set defaults
        let defaults: HashMap<String, HashMap<String, DynamicConfVal>> =
            serde_yaml::from_value(serde_yaml::to_value(&default_settings).unwrap()).unwrap();
        for (k1, inner) in &defaults {
            for (k2, v) in inner {
                match v {
                    DynamicConfVal::String(v) => {
                        s = s.set_default(format!("{k1}.{k2}"), v.as_str())?;
                    }

                    DynamicConfVal::Bool(v) => {
                        s = s.set_default(format!("{k1}.{k2}"), v.to_string())?;
                    }

                    DynamicConfVal::U16(v) => {
                        s = s.set_default(format!("{k1}.{k2}"), v.to_string())?;
                    }
                }
            }
        }

        // Make sure to list these in order
        let settings_modules: Vec<_> =
            vec![Network::FIELD_NAMES_AS_ARRAY, Node::FIELD_NAMES_AS_ARRAY];

        // Gather all possible settings keys
        let possible_keys: HashMap<String, &str> = Settings::FIELD_NAMES_AS_ARRAY
            .iter()
            .enumerate()
            .flat_map(|(i, field)| {
                settings_modules[i].iter().map(|nested| {
                    (
                        format!(
                            "{}_{}_{}",
                            prefix,
                            field.to_owned(),
                            nested.split('_').collect::<Vec<_>>().join("")
                        ),
                        *nested,
                    )
                })
            })
            .collect();

        // Parse env vars manually and set overrides if they exist as the
        // config package `Environment` module seems to behave poorly.
        for (k, v) in env_source.iter() {
            let k = k.to_lowercase();

            if let Some(&k_postfix) = possible_keys.get(&k) {
                let mut k: Vec<_> = k.split('_').filter(|x| x != &prefix).collect();
                *k.last_mut().unwrap() = k_postfix;
                let k = k.join(".");

                // Filter empty values
                if v.as_str() == "" {
                    continue;
                }

                s = s.set_override(k, v.as_str())?;
            }
        }

        s.build()?.try_deserialize()
    }

    /// Boot-time sanity check over the loaded settings.
    pub fn validate(&self) {
        match self.node.network_name.as_str() {
            "mainnet" | "testnet" => {}
            other => panic!("Invalid network name: {other}"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FieldNamesAsArray)]
pub struct Network {
    /// Enable RPC.
    #[serde(alias = "rpcenabled")]
    pub rpc_enabled: bool,

    /// RPC listen port on mainnet.
    #[serde(alias = "rpclistenportmainnet")]
    pub rpc_listen_port_mainnet: u16,

    /// RPC listen port on testnet.
    #[serde(alias = "rpclistenporttestnet")]
    pub rpc_listen_port_testnet: u16,

    /// RPC username.
    #[serde(alias = "rpcusername")]
    pub rpc_username: String,

    /// RPC password.
    #[serde(alias = "rpcpassword")]
    pub rpc_password: String,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            rpc_enabled: true,
            rpc_listen_port_mainnet: 8625,
            rpc_listen_port_testnet: 8635,
            rpc_username: "openfunds".to_owned(),
            rpc_password: "openfunds".to_owned(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FieldNamesAsArray)]
pub struct Node {
    /// The network name the node is serving campaigns for.
    #[serde(alias = "networkname")]
    pub network_name: String,

    /// Number of threads used for the RPC interface.
    ///
    /// Default is 0 which means the number of cores of the system
    #[serde(alias = "networkthreads")]
    pub network_threads: u16,

    /// Node data directory
    #[serde(alias = "datadir")]
    pub data_dir: String,

    /// If specified, campaigns are kept in memory and nothing is stored to disk.
    #[serde(alias = "memoryonly")]
    pub memory_only: bool,
}

impl Default for Node {
    fn default() -> Self {
        let mut path = dirs::config_dir().unwrap();
        path.push("OpenFunds");

        Self {
            network_name: "testnet".to_owned(), // Campaigns settle on testnet only for now
            network_threads: 0,
            data_dir: path.into_os_string().into_string().unwrap(),
            memory_only: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DynamicConfVal {
    String(String),
    Bool(bool),
    U16(u16),
}
