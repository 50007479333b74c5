//! Paging and display helpers for listings.

/// Position within a paged listing.
///
/// Pages are 1-based. The page number is clamped into range whenever the
/// total or page size changes, so a shrinking result set never leaves the
/// caller on an empty page past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    per_page: u64,
    total: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64, total: u64) -> Self {
        let per_page = per_page.max(1);
        let mut pagination = Self {
            page,
            per_page,
            total,
        };
        pagination.page = pagination.clamp(page);
        pagination
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of pages; at least 1 even for an empty result.
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(self.per_page).max(1)
    }

    /// Rows to skip for the current page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Move to another page, clamped into range.
    pub fn go_to(&mut self, page: u64) {
        self.page = self.clamp(page);
    }

    pub fn next(&mut self) {
        self.go_to(self.page.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    /// Update the row count after the filters changed.
    pub fn set_total(&mut self, total: u64) {
        self.total = total;
        self.page = self.clamp(self.page);
    }

    /// Change the page size, returning to the first page.
    pub fn set_per_page(&mut self, per_page: u64) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// 1-based index of the first and last row on this page, if any.
    pub fn row_span(&self) -> Option<(u64, u64)> {
        if self.total == 0 {
            return None;
        }
        let first = self.offset() + 1;
        let last = (self.offset() + self.per_page).min(self.total);
        Some((first, last))
    }

    fn clamp(&self, page: u64) -> u64 {
        page.clamp(1, self.total_pages())
    }
}

/// Path as shown in listings: a `dbfs:` prefix on a volume path is dropped.
pub fn display_path(path: &str) -> &str {
    match path.strip_prefix("dbfs:") {
        Some(rest) if rest.starts_with("/Volumes/") => rest,
        _ => path,
    }
}

/// Final segment of a path.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
