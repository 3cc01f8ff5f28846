//! Export renderers for entry streams.
//!
//! # Responsibility
//! - Turn entry streams into portable documents without touching the store.

pub mod markdown;
