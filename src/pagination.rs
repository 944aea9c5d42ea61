use serde::Serialize;

use crate::repository::Pagination;

/// Page size used when the request does not ask for one.
pub const DEFAULT_PAGE_SIZE: usize = 5;
/// Upper bound for `page_size`.
pub const MAX_PAGE_SIZE: usize = 100;

/// One page of a listing. `next` and `previous` are page numbers.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: usize,
    pub next: Option<usize>,
    pub previous: Option<usize>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(results: Vec<T>, count: usize, pagination: Pagination) -> Self {
        let page = pagination.page.max(1);
        let last_page = total_pages(count, pagination.per_page);

        Self {
            count,
            next: (page < last_page).then_some(page + 1),
            previous: (page > 1).then(|| page - 1),
            results,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(page: usize) -> Pagination {
        Pagination {
            page,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    #[test]
    fn middle_page_links_both_ways() {
        let paginated = Paginated::new(vec![1, 2, 3, 4, 5], 12, page(2));
        assert_eq!(paginated.count, 12);
        assert_eq!(paginated.next, Some(3));
        assert_eq!(paginated.previous, Some(1));
    }

    #[test]
    fn single_page_has_no_links() {
        let paginated = Paginated::new(vec!["a"], 1, page(1));
        assert_eq!(paginated.next, None);
        assert_eq!(paginated.previous, None);
    }

    #[test]
    fn last_page_has_no_next() {
        let paginated = Paginated::new(vec![11, 12], 12, page(3));
        assert_eq!(paginated.next, None);
        assert_eq!(paginated.previous, Some(2));
    }

    #[test]
    fn map_keeps_links() {
        let paginated = Paginated::new(vec![1, 2], 7, page(1)).map(|n| n * 10);
        assert_eq!(paginated.results, vec![10, 20]);
        assert_eq!(paginated.next, Some(2));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 5), 0);
        assert_eq!(total_pages(5, 5), 1);
        assert_eq!(total_pages(6, 5), 2);
    }
}
