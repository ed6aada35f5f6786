use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Half-open index range of 1-based `page`, clipped to `len`. Empty past the last page.
pub fn page_range(len: usize, page: usize, page_size: usize) -> Range<usize> {
    let start = page.saturating_sub(1).saturating_mul(page_size).min(len);
    let end = page.saturating_mul(page_size).min(len);
    start..end.max(start)
}

pub fn page<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    &items[page_range(items.len(), page, page_size)]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    current: usize,
    page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    pub fn total_pages(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }

    /// Keeps the current page inside `[1, max(total_pages, 1)]`.
    pub fn clamp(&mut self, len: usize) {
        let last = self.total_pages(len).max(1);
        self.current = self.current.clamp(1, last);
    }

    pub fn next(&mut self, len: usize) -> bool {
        if self.current < self.total_pages(len) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page == 0 || page > self.total_pages(len) || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        page(items, self.current, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lengths_follow_formula() {
        let items: Vec<usize> = (0..23).collect();
        for p in 1..=5 {
            let expected = 10.min(23usize.saturating_sub((p - 1) * 10));
            assert_eq!(page(&items, p, 10).len(), expected, "page {p}");
        }
    }

    #[test]
    fn pages_concatenate_to_the_whole_view() {
        let items: Vec<usize> = (0..37).collect();
        let pages = total_pages(items.len(), 10);
        let rebuilt: Vec<usize> = (1..=pages)
            .flat_map(|p| page(&items, p, 10).to_vec())
            .collect();

        assert_eq!(pages, 4);
        assert_eq!(rebuilt, items);
    }

    #[test]
    fn empty_view_has_no_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert!(page::<u8>(&[], 1, 10).is_empty());
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let mut pagination = Pagination::new(10);

        assert!(!pagination.prev());
        assert!(pagination.next(15));
        assert!(!pagination.next(15));
        assert_eq!(pagination.current(), 2);
        assert!(!pagination.go_to(3, 15));
        assert!(pagination.go_to(1, 15));
    }

    #[test]
    fn slice_returns_current_page() {
        let items: Vec<usize> = (0..12).collect();
        let mut pagination = Pagination::new(5);
        assert_eq!(pagination.slice(&items), &[0, 1, 2, 3, 4]);

        pagination.go_to(3, items.len());
        assert_eq!(pagination.slice(&items), &[10, 11]);
    }

    #[test]
    fn clamp_pulls_page_back_after_view_shrinks() {
        let mut pagination = Pagination::new(10);
        pagination.go_to(3, 30);

        pagination.clamp(12);
        assert_eq!(pagination.current(), 2);

        pagination.clamp(0);
        assert_eq!(pagination.current(), 1);
    }
}
