//! Core definitions (error type, result alias, validation helpers), relied
//! upon by all slotvec-* crates.

pub mod error;
pub mod result;

pub use result::Result;
