#![doc(test(attr(deny(warnings))))]

//! Balance Core schedules recurring payments and aggregates what is due soon,
//! feeding the upcoming-payments card and the `balance_core_cli` reports.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
#[cfg(feature = "ffi")]
pub mod ffi;
pub mod presentation;
pub mod schedule;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Balance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
