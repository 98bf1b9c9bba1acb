//! Horizontal layout of table columns.

use crate::column::ColumnSpec;
use crate::config::TableConfig;

/// What occupies a column slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotKind {
    /// Leading row-menu trigger column.
    Menu,
    /// A data column, by index into the column specs.
    Data {
        column: usize,
        title: String,
        is_title: bool,
    },
    /// Trailing edit/delete column.
    Actions,
}

/// A laid-out column: kind, left edge and width in logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSlot {
    pub kind: SlotKind,
    pub x: f32,
    pub width: f32,
}

impl ColumnSlot {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Header label; fixed columns have none.
    pub fn title(&self) -> &str {
        match &self.kind {
            SlotKind::Data { title, .. } => title,
            SlotKind::Menu | SlotKind::Actions => "",
        }
    }
}

/// Column slots for a table, left to right.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableLayout {
    pub slots: Vec<ColumnSlot>,
}

impl TableLayout {
    /// Lay out `columns`, adding the menu column when any column shows the
    /// trigger and the actions column when `actions` is set.
    pub fn compute(columns: &[ColumnSpec], actions: bool, config: &TableConfig) -> Self {
        let mut slots = Vec::with_capacity(columns.len() + 2);
        let mut x = 0.0;

        if has_menu_column(columns) {
            slots.push(ColumnSlot {
                kind: SlotKind::Menu,
                x,
                width: config.menu_column_width,
            });
            x += config.menu_column_width;
        }

        for (index, column) in columns.iter().enumerate() {
            let width = column.effective_width(config.default_column_width);
            slots.push(ColumnSlot {
                kind: SlotKind::Data {
                    column: index,
                    title: column.title.clone(),
                    is_title: column.is_title,
                },
                x,
                width,
            });
            x += width;
        }

        if actions {
            slots.push(ColumnSlot {
                kind: SlotKind::Actions,
                x,
                width: config.actions_column_width,
            });
        }

        Self { slots }
    }

    /// Total content width: sum of all slot widths.
    pub fn content_width(&self) -> f32 {
        self.slots.iter().map(|slot| slot.width).sum()
    }

    pub fn has_menu(&self) -> bool {
        self.slots.iter().any(|slot| slot.kind == SlotKind::Menu)
    }

    pub fn has_actions(&self) -> bool {
        self.slots.iter().any(|slot| slot.kind == SlotKind::Actions)
    }

    /// Slots at least partly inside `[offset, offset + viewport)`.
    pub fn visible(&self, offset: f32, viewport: f32) -> impl Iterator<Item = &ColumnSlot> {
        let end = offset + viewport;
        self.slots
            .iter()
            .filter(move |slot| slot.right() > offset && slot.x < end)
    }
}

/// Whether any column asks for the row-menu trigger.
pub fn has_menu_column(columns: &[ColumnSpec]) -> bool {
    columns.iter().any(|column| column.show_dots)
}
