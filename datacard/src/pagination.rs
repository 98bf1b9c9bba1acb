//! Page arithmetic and navigation controls.
//!
//! Pages are 1-based. A table always has at least one page, so an empty
//! dataset still sits on page 1.

use crate::error::TableError;

// =============================================================================
// NavControl
// =============================================================================

/// The four page-navigation buttons, in display order around the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavControl {
    First,
    Previous,
    Next,
    Last,
}

impl NavControl {
    pub const ALL: [NavControl; 4] = [
        NavControl::First,
        NavControl::Previous,
        NavControl::Next,
        NavControl::Last,
    ];

    /// Glyph drawn for this control.
    pub fn symbol(self) -> &'static str {
        match self {
            NavControl::First => "«",
            NavControl::Previous => "‹",
            NavControl::Next => "›",
            NavControl::Last => "»",
        }
    }
}

/// Enabled state of one navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub control: NavControl,
    pub enabled: bool,
}

// =============================================================================
// Pager
// =============================================================================

/// Snapshot of paging numbers for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub items_per_page: usize,
    pub active_page: usize,
    pub total_records: usize,
}

impl Pager {
    /// Build a pager, rejecting a zero page size.
    ///
    /// The active page is clamped into range.
    pub fn new(
        items_per_page: usize,
        active_page: usize,
        total_records: usize,
    ) -> Result<Self, TableError> {
        if items_per_page == 0 {
            return Err(TableError::InvalidPageSize(items_per_page));
        }
        let mut pager = Self {
            items_per_page,
            active_page,
            total_records,
        };
        pager.active_page = pager.clamp_page(active_page);
        Ok(pager)
    }

    /// `max(ceil(total_records / items_per_page), 1)`.
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_records, self.items_per_page)
    }

    /// Clamp any requested page into `[1, total_pages]`.
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages())
    }

    /// Index of the first record on the active page.
    pub fn start_index(&self) -> usize {
        (self.active_page - 1) * self.items_per_page
    }

    /// One past the last record on the active page, capped at the record count.
    pub fn end_index(&self) -> usize {
        (self.active_page * self.items_per_page).min(self.total_records)
    }

    /// Range of records shown on the active page.
    pub fn window(&self) -> std::ops::Range<usize> {
        let end = self.end_index();
        self.start_index().min(end)..end
    }

    /// `"{start+1} – {end} of {total}"`.
    ///
    /// An empty dataset reads `"1 – 0 of 0"`.
    pub fn label(&self) -> String {
        format!(
            "{} – {} of {}",
            self.start_index() + 1,
            self.end_index(),
            self.total_records
        )
    }

    pub fn is_first(&self) -> bool {
        self.active_page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.active_page >= self.total_pages()
    }

    pub fn is_enabled(&self, control: NavControl) -> bool {
        match control {
            NavControl::First | NavControl::Previous => !self.is_first(),
            NavControl::Next | NavControl::Last => !self.is_last(),
        }
    }

    pub fn controls(&self) -> [ControlState; 4] {
        NavControl::ALL.map(|control| ControlState {
            control,
            enabled: self.is_enabled(control),
        })
    }

    /// Page a control leads to, or `None` when the control is disabled.
    pub fn target(&self, control: NavControl) -> Option<usize> {
        if !self.is_enabled(control) {
            return None;
        }
        Some(match control {
            NavControl::First => 1,
            NavControl::Previous => self.active_page - 1,
            NavControl::Next => self.active_page + 1,
            NavControl::Last => self.total_pages(),
        })
    }

    /// Clamp a requested page and drop it if it is the page already shown.
    pub fn resolve_request(&self, page: usize) -> Option<usize> {
        let page = self.clamp_page(page);
        (page != self.active_page).then_some(page)
    }
}

/// `max(ceil(total_records / items_per_page), 1)`. A zero page size counts as one.
pub fn total_pages(total_records: usize, items_per_page: usize) -> usize {
    total_records.div_ceil(items_per_page.max(1)).max(1)
}
