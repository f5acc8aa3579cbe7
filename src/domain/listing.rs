//! Filtering, ordering and windowing of a lead set for display and export.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::lead::{Lead, LeadField};

/// Number of leads shown per page.
pub const LEADS_PER_PAGE: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Active column and direction governing display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: LeadField,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(key: LeadField, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Sort that results from clicking the `key` header while `current` is
    /// active: the same ascending column flips to descending, anything else
    /// starts ascending.
    pub fn toggled(current: Option<SortConfig>, key: LeadField) -> SortConfig {
        match current {
            Some(SortConfig {
                key: active,
                direction: SortDirection::Asc,
            }) if active == key => SortConfig::new(key, SortDirection::Desc),
            _ => SortConfig::new(key, SortDirection::Asc),
        }
    }

    fn compare(&self, a: &Lead, b: &Lead) -> Ordering {
        let ordering = match self.key {
            LeadField::Rating => a
                .review_count()
                .cmp(&b.review_count())
                .then_with(|| a.rating_value().total_cmp(&b.rating_value())),
            LeadField::Reviews => a.review_count().cmp(&b.review_count()),
            key => a
                .field_text(key)
                .to_lowercase()
                .cmp(&b.field_text(key).to_lowercase()),
        };
        self.direction.apply(ordering)
    }
}

/// Active inclusion predicates, combined with logical AND.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFilter {
    pub has_website: bool,
    pub has_phone: bool,
}

impl LeadFilter {
    pub fn matches(&self, lead: &Lead) -> bool {
        (!self.has_website || lead.has_website()) && (!self.has_phone || lead.has_phone())
    }
}

/// Keeps the leads matching `filter`, preserving their order.
pub fn filter_leads<'a>(leads: &'a [Lead], filter: &LeadFilter) -> Vec<&'a Lead> {
    leads.iter().filter(|lead| filter.matches(lead)).collect()
}

/// Orders leads in place. Without a sort the original order is kept.
pub fn sort_leads(leads: &mut [&Lead], sort: Option<&SortConfig>) {
    if let Some(sort) = sort {
        // `sort_by` is stable, so ties keep their response order.
        leads.sort_by(|a, b| sort.compare(a, b));
    }
}

/// Filtered and sorted view of a lead set: what the table shows and what
/// gets exported.
pub fn visible_leads<'a>(
    leads: &'a [Lead],
    filter: &LeadFilter,
    sort: Option<&SortConfig>,
) -> Vec<&'a Lead> {
    let mut visible = filter_leads(leads, filter);
    sort_leads(&mut visible, sort);
    visible
}

/// Window `[(page-1)*per_page, page*per_page)` clamped to the slice bounds.
///
/// The page number itself is not clamped; an out-of-range page yields an
/// empty or partial window. Page `0` is treated like page `1`.
pub fn page_window<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}
