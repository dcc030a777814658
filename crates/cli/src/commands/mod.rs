//! CLI command implementations.

pub mod config_cmd;
pub mod demo;
pub mod resolve;
