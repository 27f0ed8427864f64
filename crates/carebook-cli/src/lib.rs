//! carebook-cli library root.
//!
//! Argument parsing, config handling and command implementations live here
//! so integration tests can drive them without spawning the binary.

pub mod cli;
pub mod commands;
pub mod config;
