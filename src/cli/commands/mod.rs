//! CLI command implementations.
//!
//! Each submodule implements one top-level CLI command (analyze,
//! signatures, config).

pub mod analyze;
pub mod config;
pub mod signatures;

pub use analyze::cmd_analyze;
pub use config::cmd_config;
pub use signatures::cmd_signatures;
