//! Discrete UI events a table reacts to.

use crate::pagination::NavControl;

/// An input to [`TableView::handle`](crate::TableView::handle).
///
/// Row indices are positions on the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableEvent {
    /// The body reported an absolute horizontal scroll offset.
    ScrollTo(f32),
    /// Scroll horizontally by a relative amount.
    ScrollBy(f32),
    /// The visible container was measured.
    Resize { viewport_width: f32 },
    Navigate(NavControl),
    GoToPage(usize),
    /// The row-menu trigger of a row was pressed.
    ToggleMenu(usize),
    CloseMenu,
    /// An item of the open row menu was pressed.
    ActivateMenuItem(usize),
    PressRow(usize),
    Edit(usize),
    Delete(usize),
}
