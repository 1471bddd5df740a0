//! Resume document model.
//!
//! # Responsibility
//! - Define the `Resume` aggregate and its nested value types.
//! - Keep the model free of I/O; storage backends only copy whole values.
//!
//! # Invariants
//! - Every document is identified by its `uuid`, unique across backends.
//! - "Unset" contacts/sections are absent keys, never placeholder values.

pub mod experience;
pub mod resume;
pub mod section;
