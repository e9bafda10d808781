// Copyright (c) 2025 The OpenFunds Core developers
// Licensed under the Apache License, Version 2.0 see LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0 or the MIT license, see
// LICENSE-MIT or http://opensource.org/licenses/MIT

use lazy_static::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Instant;

lazy_static! {
    /// Set once a termination signal is received or an rpc stop call is
    /// dispatched. Watched by the main loop and the runtime.
    pub static ref EXIT_SIGNAL: Arc<AtomicBool> = Arc::new(AtomicBool::new(false));

    /// Process start time, reported by the rpc uptime call.
    pub static ref STARTED_AT: Instant = Instant::now();
}

/// Initialize globals
pub fn init() {
    lazy_static::initialize(&STARTED_AT);
}
