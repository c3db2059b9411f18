//! Upstream data: fetching the status page and pulling counts out of it.

pub mod extract;
pub mod source;

pub use extract::extract_fields;
pub use source::{HttpSource, PageSource};
