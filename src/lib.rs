#![doc(test(attr(deny(warnings))))]

//! Sales Ledger records individual sale transactions and turns them into
//! KPI summaries, period trends, rankings and profitability views.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Sales Ledger tracing initialized.");
    });
}
