//! carebook-core
//!
//! Pure domain types shared by the scoring engine, the audit sink and the CLI.
//! No I/O lives here.

pub mod error;
pub mod models;
