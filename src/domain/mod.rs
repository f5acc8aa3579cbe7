//! Domain aggregates exposed by the lead search service layer.

pub mod lead;
pub mod lead_set;
pub mod listing;
pub mod location;
pub mod messaging;
pub mod session;
pub mod types;
