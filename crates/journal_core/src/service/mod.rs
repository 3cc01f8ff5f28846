//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store scans and query operators into use-case level APIs.
//! - Keep CLI layers decoupled from storage details.

pub mod journal_service;
