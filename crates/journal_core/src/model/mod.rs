//! Journal domain model.
//!
//! # Responsibility
//! - Define the single persisted record (`Entry`) and its line codec.
//!
//! # Invariants
//! - Entries are append-only; nothing in core mutates a persisted entry.
//! - Entries have no explicit ID; file position is their only identity.

pub mod entry;
