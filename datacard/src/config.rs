//! Table configuration.
//!
//! All widths are logical pixels. Every field has a default so a partial
//! config file deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Rows shown per page when the caller does not say otherwise.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;
/// Width of a column that does not declare one.
pub const DEFAULT_COLUMN_WIDTH: f32 = 120.0;
/// Width of the leading row-menu trigger column.
pub const MENU_COLUMN_WIDTH: f32 = 50.0;
/// Width of the trailing edit/delete column.
pub const ACTIONS_COLUMN_WIDTH: f32 = 100.0;
/// Narrowest the scrollbar thumb may get.
pub const MIN_THUMB_WIDTH: f32 = 40.0;

/// Tunable constants for a table instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub items_per_page: usize,
    pub default_column_width: f32,
    pub menu_column_width: f32,
    pub actions_column_width: f32,
    pub min_thumb_width: f32,
    /// Message shown in place of the rows when the page is empty.
    pub empty_message: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            default_column_width: DEFAULT_COLUMN_WIDTH,
            menu_column_width: MENU_COLUMN_WIDTH,
            actions_column_width: ACTIONS_COLUMN_WIDTH,
            min_thumb_width: MIN_THUMB_WIDTH,
            empty_message: "No records found".to_string(),
        }
    }
}

impl TableConfig {
    /// Check that every value can drive layout and paging math.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.items_per_page == 0 {
            return Err(TableError::InvalidPageSize(self.items_per_page));
        }
        check_width("default_column_width", self.default_column_width)?;
        check_width("menu_column_width", self.menu_column_width)?;
        check_width("actions_column_width", self.actions_column_width)?;
        check_width("min_thumb_width", self.min_thumb_width)?;
        Ok(())
    }
}

pub(crate) fn check_width(what: &'static str, value: f32) -> Result<(), TableError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TableError::InvalidWidth { what, value })
    }
}
