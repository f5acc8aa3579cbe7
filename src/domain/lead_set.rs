use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::lead::Lead;
use crate::domain::location::Location;
use crate::domain::types::Keyword;

/// Result of the most recent successful search of a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LeadSet {
    pub keyword: Keyword,
    pub location: Location,
    /// Records in the order the search service returned them.
    pub leads: Vec<Lead>,
    pub created_at: NaiveDateTime,
}

impl LeadSet {
    #[must_use]
    pub fn new(keyword: Keyword, location: Location, leads: Vec<Lead>) -> Self {
        Self {
            keyword,
            location,
            leads,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Download name of the spreadsheet export:
    /// `leads_<keyword>_<city>[_<district>][_<village>].xlsx`, with every
    /// whitespace run collapsed into a single underscore.
    pub fn export_filename(&self) -> String {
        let stem = std::iter::once(self.keyword.as_str())
            .chain(self.location.file_parts())
            .map(|part| part.split_whitespace().collect::<Vec<_>>().join("_"))
            .collect::<Vec<_>>()
            .join("_");
        format!("leads_{stem}.xlsx")
    }
}
