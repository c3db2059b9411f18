//! Domain types and the pure parts of the ingest pipeline.
//!
//! This module defines:
//!
//! - the persisted record shape (`DailyRecord`) and run configuration
//! - the local-day key computation (`day_key`)
//! - the upsert of one observation into the series (`series`)

pub mod day_key;
pub mod series;
pub mod types;

pub use types::*;
