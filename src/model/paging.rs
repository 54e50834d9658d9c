use serde::Serialize;
use utoipa::ToSchema;

/// Number of employees shown on one page.
pub const PAGE_SIZE: u32 = 5;

/// Number of pages needed to show `total_records` rows, `page_size` at a time.
///
/// # Panics
///
/// Panics if `page_size` is zero. [`Paging`] never hands out a zero size.
pub fn compute_total_pages(total_records: u64, page_size: u32) -> u64 {
    total_records.div_ceil(u64::from(page_size))
}

/// Paging state for a single list request. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    current_page: u32,
    page_size: u32,
    total_pages: u64,
    start_page: u32,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: PAGE_SIZE,
            total_pages: 0,
            start_page: 1,
        }
    }
}

impl Paging {
    /// Paging positioned on `current_page`; values below 1 are clamped to 1.
    pub fn new(current_page: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            ..Self::default()
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    pub fn start_page(&self) -> u32 {
        self.start_page
    }

    /// Rows to skip before the current page starts.
    pub fn offset(&self) -> u64 {
        u64::from(self.current_page - 1) * u64::from(self.page_size)
    }

    pub fn set_total_records(&mut self, total_records: u64) {
        self.total_pages = compute_total_pages(total_records, self.page_size);
    }
}
