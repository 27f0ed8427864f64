//! carebook-audit
//!
//! Append-only destination for finalized assessments, plus structured audit
//! events logged through `tracing`.

pub mod error;
pub mod events;
pub mod sink;
