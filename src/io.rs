//! File input/output.

pub mod param;
pub mod utils;
