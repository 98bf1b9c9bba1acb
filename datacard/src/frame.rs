//! Render model produced by a table for one frame.

use crate::column::CellContent;
use crate::layout::ColumnSlot;
use crate::pagination::ControlState;
use crate::scroll::ScrollThumb;

/// Everything needed to draw a table once.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFrame {
    pub slots: Vec<ColumnSlot>,
    pub body: FrameBody,
    pub pagination: PaginationBar,
    pub scrollbar: ScrollbarFrame,
    pub menu: Option<MenuOverlay>,
}

impl TableFrame {
    /// Rows of the body, empty for the placeholder body.
    pub fn rows(&self) -> &[FrameRow] {
        match &self.body {
            FrameBody::Rows(rows) => rows,
            FrameBody::Empty { .. } => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.body, FrameBody::Empty { .. })
    }

    /// Header labels in slot order. None for the placeholder body.
    pub fn header(&self) -> Option<Vec<&str>> {
        if self.is_empty() {
            return None;
        }
        Some(self.slots.iter().map(ColumnSlot::title).collect())
    }
}

/// Table body: rows, or a placeholder in place of header and rows.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBody {
    Rows(Vec<FrameRow>),
    Empty { message: String },
}

/// A body row; `cells` lines up with the frame's slots.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRow {
    /// Index within the current page.
    pub index: usize,
    pub cells: Vec<CellContent>,
    pub menu_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationBar {
    pub label: String,
    pub active_page: usize,
    pub total_pages: usize,
    pub controls: [ControlState; 4],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarFrame {
    pub offset_x: f32,
    pub content_width: f32,
    pub track_width: f32,
    pub thumb: ScrollThumb,
}

/// The open row menu, anchored to its row's trigger.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOverlay {
    pub row: usize,
    /// Logical x of the trigger cell's right edge.
    pub anchor_x: f32,
    /// Item labels; empty when no renderer is configured.
    pub items: Vec<String>,
}
