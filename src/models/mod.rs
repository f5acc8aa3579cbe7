//! Database models shared across the lead repository.

pub mod config;
pub mod lead_set;
pub mod session;
