use serde::Serialize;

/// One control in the page bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "page")]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Fixed-size windowing over a result list. Pages are 1-indexed and never
/// clamped: an out-of-range page yields an empty slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub const DEFAULT_PAGE_SIZE: usize = 9;

    /// A zero page size is treated as one item per page
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    pub fn slice<'a, T>(&self, items: &'a [T], current_page: usize) -> &'a [T] {
        if current_page == 0 {
            return &[];
        }
        let start = (current_page - 1).saturating_mul(self.page_size);
        if start >= items.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size).min(items.len());
        &items[start..end]
    }

    /// Page bar for `current_page`; empty when there is at most one page
    pub fn buttons(&self, total_items: usize, current_page: usize) -> Vec<PageButton> {
        page_buttons(self.total_pages(total_items), current_page)
    }

    pub fn page<T: Clone>(&self, items: &[T], current_page: usize) -> Page<T> {
        let total_pages = self.total_pages(items.len());
        Page {
            items: self.slice(items, current_page).to_vec(),
            current_page,
            total_pages,
            total_items: items.len(),
            has_previous: current_page > 1,
            has_next: current_page < total_pages,
            buttons: page_buttons(total_pages, current_page),
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE_SIZE)
    }
}

/// Visible page controls: first, last and the neighbours of `current_page`,
/// with each hidden run collapsed into a single ellipsis.
pub fn page_buttons(total_pages: usize, current_page: usize) -> Vec<PageButton> {
    if total_pages <= 1 {
        return Vec::new();
    }

    let mut buttons = Vec::new();
    let mut hidden_run = false;
    for page in 1..=total_pages {
        let visible = page == 1 || page == total_pages || page.abs_diff(current_page) <= 1;
        if visible {
            buttons.push(PageButton::Page(page));
            hidden_run = false;
        } else if !hidden_run {
            buttons.push(PageButton::Ellipsis);
            hidden_run = true;
        }
    }
    buttons
}

/// One rendered page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub buttons: Vec<PageButton>,
}
