//! Table error types.

use thiserror::Error;

/// Errors reported by table construction and caller-driven updates.
///
/// Rendering never fails: numeric guards and placeholder values cover
/// everything that happens while drawing a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TableError {
    /// Items per page must be at least one.
    #[error("items per page must be at least 1, got {0}")]
    InvalidPageSize(usize),
    /// A caller supplied a page outside `[1, total_pages]`.
    #[error("page {page} is outside 1..={total_pages}")]
    PageOutOfRange { page: usize, total_pages: usize },
    /// A row index does not refer to a row on the current page.
    #[error("row {row} is not on the current page ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },
    /// A configured width is not a positive finite number.
    #[error("{what} must be a positive number, got {value}")]
    InvalidWidth { what: &'static str, value: f32 },
    /// A column asks for a row-menu trigger but no menu renderer is set.
    #[error("column '{column}' shows a row menu trigger but no row menu renderer is set")]
    MenuWithoutRenderer { column: String },
}
