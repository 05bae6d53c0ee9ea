#![doc(test(attr(deny(warnings))))]

//! Venture Form drives the create/edit travel group form: a three step wizard
//! with gated tabs, a tag editor, an itinerary generator and a confirmation
//! gate in front of the final submission.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod time;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Venture Form tracing initialized.");
    });
}
