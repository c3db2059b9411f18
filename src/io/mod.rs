//! Input/output helpers.
//!
//! - series JSON load + atomic save (`series`)

pub mod series;

pub use series::*;
