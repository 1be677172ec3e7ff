#![doc(test(attr(deny(warnings))))]

//! Milkbook tracks daily milk deliveries, turns a month of records into a
//! billed total, and coordinates the interactive views over a persisted
//! snapshot.

pub mod app;
pub mod billing;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod share;
pub mod speech;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Milkbook tracing initialized.");
    });
}
