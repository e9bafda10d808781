// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use log::*;
use openfunds::global::EXIT_SIGNAL;
use openfunds::primitives::Hash256;
use openfunds::rpc::{RpcRequest, RpcServer};
use openfunds::settings::SETTINGS;
use openfunds::store::disk::DiskBackend;
use openfunds::store::memory::MemoryBackend;
use openfunds::store::{create_rocksdb_backend, CampaignStore};

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use tokio::runtime::Builder;
use tokio::time::sleep;
use tracing_subscriber::prelude::*;

#[cfg(not(windows))]
use signal_hook::consts::TERM_SIGNALS;
#[cfg(not(windows))]
use signal_hook::flag;

use warp::Filter;

fn main() -> anyhow::Result<()> {
    openfunds::global::init();

    #[cfg(not(windows))]
    for sig in TERM_SIGNALS {
        // When terminated by a second term signal, exit with exit code 1.
        // This will do nothing the first time (because term_now is false).
        flag::register_conditional_shutdown(*sig, 1, EXIT_SIGNAL.clone())?;
        // But this will "arm" the above for the second time, by setting it to true.
        // The order of registering these is important, if you put this one first, it will
        // first arm and then terminate ‒ all in the first round.
        flag::register(*sig, EXIT_SIGNAL.clone())?;
    }

    run_init()
}

fn run_init() -> anyhow::Result<()> {
    let t = thread::spawn(start_runtime);

    // This loop runs forever, and blocks until the exit signal is received
    loop {
        if EXIT_SIGNAL.load(Ordering::Relaxed) {
            break;
        }
        thread::sleep(Duration::from_millis(200));
    }

    // Wait for thread to exit
    let _ = t.join().unwrap();

    Ok(())
}

fn start_runtime() -> anyhow::Result<()> {
    let worker_threads = if SETTINGS.node.network_threads == 0 {
        num_cpus::get()
    } else {
        SETTINGS.node.network_threads as usize
    };

    let runtime = Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_io()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        init_tracing()?;
        perform_sanity_checks();

        if SETTINGS.node.memory_only {
            info!(
                "Running OpenFunds Core v{} on {} in memory only mode",
                env!("CARGO_PKG_VERSION"),
                SETTINGS.node.network_name
            );
            serve(RpcServer {
                store: MemoryBackend::new(),
            })
            .await
        } else {
            info!(
                "Running OpenFunds Core v{} on {}",
                env!("CARGO_PKG_VERSION"),
                SETTINGS.node.network_name
            );
            let db = create_rocksdb_backend();
            serve(RpcServer {
                store: DiskBackend::new(db),
            })
            .await
        }
    })
}

async fn serve<B>(server: RpcServer<B>) -> anyhow::Result<()>
where
    B: CampaignStore + Send + Sync + 'static,
{
    let run_rpc = async move {
        if SETTINGS.network.rpc_enabled {
            let server_filter = warp::any().map(move || server.clone());
            let rpc_path = warp::post()
                .and(warp::path::end())
                .and(json_body())
                .and(server_filter)
                .and(warp::header("authorization"))
                .and_then(handle_rpc_request::<B>);

            let port = match SETTINGS.node.network_name.as_str() {
                "mainnet" => SETTINGS.network.rpc_listen_port_mainnet,
                "testnet" => SETTINGS.network.rpc_listen_port_testnet,
                other => panic!("Invalid network name: {other}"),
            };

            info!(
                "OpenFunds Core v{} RPC Listening on port {}",
                env!("CARGO_PKG_VERSION"),
                port
            );

            warp::serve(rpc_path).run(([127, 0, 0, 1], port)).await;
        } else {
            loop {
                sleep(Duration::from_secs(1)).await;
            }
        }

        Ok::<(), ()>(())
    };

    tokio::select!(
        _ = tokio::spawn(run_rpc) => (),
        _ = tokio::spawn(check_exit_signal()) => (),
    );

    Ok(())
}

async fn check_exit_signal() {
    loop {
        if EXIT_SIGNAL.load(Ordering::Relaxed) {
            break;
        }

        sleep(Duration::from_millis(10)).await;
    }

    info!(
        "OpenFunds Core v{} shutting down...",
        env!("CARGO_PKG_VERSION")
    )
}

#[tracing::instrument(skip(server, authorization))]
async fn handle_rpc_request<B>(
    request: RpcRequest,
    server: RpcServer<B>,
    authorization: String,
) -> Result<impl warp::Reply, warp::Rejection>
where
    B: CampaignStore + Send + Sync + 'static,
{
    if !check_authorization_header(authorization) {
        return Ok(warp::reply::with_status(
            warp::reply::json(&"Forbidden".to_owned()),
            warp::http::StatusCode::FORBIDDEN,
        ));
    }

    match server.dispatch(request) {
        Ok(resp) => Ok(warp::reply::with_status(
            warp::reply::json(&resp),
            warp::http::StatusCode::CREATED,
        )),

        Err(err) => Ok(warp::reply::with_status(
            warp::reply::json(&err),
            warp::http::StatusCode::BAD_REQUEST,
        )),
    }
}

fn check_authorization_header(auth: String) -> bool {
    let split: Vec<_> = auth.split(' ').collect();

    if split.len() != 2 {
        return false;
    }

    if split[0] != "Basic" {
        return false;
    }

    let decoded = match base64::decode(split[1]) {
        Ok(decoded) => decoded,
        Err(_) => return false,
    };

    // Hash both stored credentials and given ones and then constant compare the two hashes
    let hash_key = "basic_auth";
    let oracle_key = format!(
        "{}:{}",
        SETTINGS.network.rpc_username, SETTINGS.network.rpc_password
    );
    let oracle_hash = Hash256::hash_from_slice(oracle_key.as_bytes(), hash_key);
    let hash = Hash256::hash_from_slice(decoded, hash_key);

    constant_time_eq::constant_time_eq_32(&oracle_hash.0, &hash.0)
}

fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    Ok(())
}

fn json_body() -> impl Filter<Extract = (RpcRequest,), Error = warp::Rejection> + Clone {
    // When accepting a body, we want a JSON body
    // (and to reject huge payloads)...
    warp::body::content_length_limit(1024 * 64).and(warp::body::json::<RpcRequest>())
}

fn perform_sanity_checks() {
    // Validate settings
    SETTINGS.validate();

    debug!(
        "Loaded settings: {}",
        serde_json::to_string(&*SETTINGS).unwrap_or_default()
    );
}
