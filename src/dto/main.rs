use serde::{Deserialize, Serialize};

use crate::domain::lead::{Lead, LeadField};
use crate::domain::lead_set::LeadSet;
use crate::domain::listing::{LeadFilter, SortConfig, SortDirection};
use crate::domain::session::SessionSettings;
use crate::pagination::Paginated;

/// Query parameters of the index page, the export link and the leads API.
///
/// Filter, sort and page describe the table view; the region ids carry the
/// state of the cascading location selectors.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<LeadField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<SortDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_website: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_phone: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
}

impl IndexQuery {
    pub fn filter(&self) -> LeadFilter {
        LeadFilter {
            has_website: self.has_website.unwrap_or(false),
            has_phone: self.has_phone.unwrap_or(false),
        }
    }

    pub fn sort_config(&self) -> Option<SortConfig> {
        self.sort
            .map(|key| SortConfig::new(key, self.dir.unwrap_or_default()))
    }

    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }

    /// Query after clicking the `key` column header. The page resets to 1.
    pub fn sorted_by(&self, key: LeadField) -> Self {
        let sort = SortConfig::toggled(self.sort_config(), key);
        Self {
            sort: Some(sort.key),
            dir: Some(sort.direction),
            page: None,
            ..self.clone()
        }
    }

    pub fn on_page(&self, page: usize) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// Only the table-view part of the query (no region selection).
    pub fn view_only(&self) -> Self {
        Self {
            province: None,
            regency: None,
            district: None,
            village: None,
            ..self.clone()
        }
    }

    /// URL-encoded form, suitable for links (`?` not included).
    pub fn to_query_string(&self) -> String {
        serde_html_form::to_string(self).unwrap_or_default()
    }
}

/// One rendered table row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LeadRow {
    /// 1-based position within the filtered and sorted view.
    pub position: usize,
    #[serde(flatten)]
    pub lead: Lead,
    pub messaging_link: String,
}

/// Sortable column header with the link it points to.
#[derive(Debug, Clone, Serialize)]
pub struct SortHeader {
    pub field: LeadField,
    pub label: &'static str,
    pub url: String,
    /// `Some("asc" | "desc")` on the active column.
    pub direction: Option<&'static str>,
}

/// Navigation entry; `page == None` renders as a gap.
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    pub page: Option<usize>,
    pub url: Option<String>,
    pub current: bool,
}

/// Data required to render the main index template.
pub struct IndexPageData {
    pub settings: SessionSettings,
    /// Last search, without its records.
    pub lead_set: Option<LeadSet>,
    /// Number of stored records before filtering.
    pub total: usize,
    pub leads: Paginated<LeadRow>,
    pub headers: Vec<SortHeader>,
    pub page_links: Vec<PageLink>,
    pub query: IndexQuery,
    pub export_url: String,
}

/// A generated spreadsheet ready to be sent to the browser.
#[derive(Debug)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorting_resets_the_page() {
        let query = IndexQuery {
            page: Some(4),
            province: Some("32".into()),
            ..IndexQuery::default()
        };

        let sorted = query.sorted_by(LeadField::Rating);
        assert_eq!(sorted.page, None);
        assert_eq!(sorted.sort, Some(LeadField::Rating));
        assert_eq!(sorted.dir, Some(SortDirection::Asc));
        assert_eq!(sorted.province.as_deref(), Some("32"));

        let flipped = sorted.on_page(2).sorted_by(LeadField::Rating);
        assert_eq!(flipped.dir, Some(SortDirection::Desc));
        assert_eq!(flipped.page, None);
    }

    #[test]
    fn query_string_skips_unset_fields() {
        let query = IndexQuery {
            sort: Some(LeadField::Reviews),
            dir: Some(SortDirection::Desc),
            has_phone: Some(true),
            ..IndexQuery::default()
        };

        assert_eq!(
            query.to_query_string(),
            "sort=reviews&dir=desc&has_phone=true"
        );
        assert_eq!(IndexQuery::default().to_query_string(), "");
    }

    #[test]
    fn query_string_round_trips() {
        let query = IndexQuery {
            sort: Some(LeadField::Name),
            page: Some(3),
            regency: Some("3273".into()),
            ..IndexQuery::default()
        };

        let parsed: IndexQuery = serde_html_form::from_str(&query.to_query_string()).unwrap();

        assert_eq!(parsed, query);
    }
}
