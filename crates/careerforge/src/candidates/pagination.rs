use serde::Serialize;

/// Results shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A 1-indexed window over an ordered result sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: usize,
    pub total_pages: usize,
    pub total_results: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    /// 1-based position of the first item on this page within the full result.
    pub fn first_position(&self) -> usize {
        (self.page_number - 1) * self.page_size + 1
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            total_pages: self.total_pages,
            total_results: self.total_results,
            page_size: self.page_size,
        }
    }
}

/// `max(1, ceil(total / page_size))`; a zero page size counts as one.
pub fn total_pages(total_results: usize, page_size: usize) -> usize {
    total_results.div_ceil(page_size.max(1)).max(1)
}

/// Slices `results` into the requested page, clamping `page_number` into
/// `[1, total_pages]`. The final page may be short.
pub fn paginate<T>(results: Vec<T>, page_number: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_results = results.len();
    let total_pages = total_pages(total_results, page_size);
    let page_number = page_number.clamp(1, total_pages);

    let start = ((page_number - 1) * page_size).min(total_results);
    let end = (start + page_size).min(total_results);
    let items = results.into_iter().skip(start).take(end - start).collect();

    Page {
        items,
        page_number,
        total_pages,
        total_results,
        page_size,
    }
}
