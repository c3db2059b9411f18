//! `sf-covid` library crate.
//!
//! The binary (`sfc`) is a thin wrapper around this library so that:
//!
//! - the ingest pipeline is testable without spawning processes or touching the network
//! - the extraction, day-key and merge steps can be exercised on their own

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
