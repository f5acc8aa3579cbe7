use serde::Serialize;

use crate::domain::listing::{page_window, total_pages};

/// Page numbers shown in the navigation bar; `None` marks a gap ("…").
fn get_pages(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    // Pages past the end are drawn like the page right after the last one.
    let current_page = current_page.min(last_page + 1);
    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub total_pages: usize,
    /// Number of items across all pages.
    pub total: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, current_page: usize, total_pages: usize, total: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };

        let pages = get_pages(total_pages, current_page, 2, 2, 4, 2);

        Self {
            items,
            pages,
            page: current_page,
            total_pages,
            total,
        }
    }

    /// Cuts page `page` out of `all` and maps the window with `f`, which also
    /// receives the 1-based position of the item within `all`.
    pub fn from_slice<S>(
        all: &[S],
        page: usize,
        per_page: usize,
        mut f: impl FnMut(usize, &S) -> T,
    ) -> Self {
        let page = page.max(1);
        let offset = (page - 1).saturating_mul(per_page);
        let total_pages = total_pages(all.len(), per_page);
        let items = page_window(all, page, per_page)
            .iter()
            .enumerate()
            .map(|(index, item)| f(offset + index + 1, item))
            .collect();
        Self::new(items, page, total_pages, all.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_collapse_far_ranges() {
        let pages = get_pages(20, 10, 2, 2, 4, 2);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(8),
                Some(9),
                Some(10),
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                None,
                Some(19),
                Some(20)
            ]
        );
    }

    #[test]
    fn navigation_stays_within_bounds() {
        let pages = get_pages(3, 1, 2, 2, 4, 2);
        assert_eq!(pages, vec![Some(1), Some(2), Some(3)]);
        assert!(get_pages(0, 1, 2, 2, 4, 2).is_empty());
        assert_eq!(get_pages(3, usize::MAX, 2, 2, 4, 2), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn from_slice_windows_and_counts() {
        let items: Vec<usize> = (1..=120).collect();
        let paginated = Paginated::from_slice(&items, 3, 50, |position, n| (position, n * 10));

        assert_eq!(paginated.items.len(), 20);
        assert_eq!(paginated.items[0], (101, 1010));
        assert_eq!(paginated.total, 120);
        assert_eq!(paginated.total_pages, 3);
        assert_eq!(paginated.pages, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn page_zero_reads_as_first_page() {
        let items = vec!["a", "b", "c"];
        let paginated = Paginated::from_slice(&items, 0, 2, |position, s| format!("{position}{s}"));

        assert_eq!(paginated.page, 1);
        assert_eq!(paginated.items, vec!["1a", "2b"]);
    }

    #[test]
    fn huge_page_number_yields_empty_page() {
        let items: Vec<usize> = (0..10).collect();
        let paginated = Paginated::from_slice(&items, usize::MAX, 50, |_, n| *n);

        assert!(paginated.items.is_empty());
        assert_eq!(paginated.page, usize::MAX);
        assert_eq!(paginated.total_pages, 1);
        assert_eq!(paginated.pages, vec![Some(1)]);
    }
}
