//! Library surface of the `migrate-legacy` binary.

pub mod config;
pub mod logging;
pub mod pipeline;
