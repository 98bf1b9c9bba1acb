//! Per-row overflow menu.
//!
//! At most one row menu is open at a time: the open state is a single
//! optional row index, not a set.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::row::Row;

// =============================================================================
// MenuCloser
// =============================================================================

/// Handle given to a row-menu renderer so its items can close the menu.
///
/// Cheap to clone; every clone closes the same menu.
#[derive(Debug, Clone, Default)]
pub struct MenuCloser {
    requested: Arc<AtomicBool>,
}

impl MenuCloser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the table to close the menu this handle was issued for.
    pub fn close(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    fn take(&self) -> bool {
        self.requested.swap(false, Ordering::SeqCst)
    }
}

// =============================================================================
// MenuContent
// =============================================================================

type ItemAction = Box<dyn FnMut() + Send>;

/// One entry of a row menu.
pub struct MenuItem {
    pub label: String,
    action: Option<ItemAction>,
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl MenuItem {
    /// An item that only displays a label.
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: None,
        }
    }

    /// An item that runs `action` when activated.
    pub fn action<F>(label: impl Into<String>, action: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        Self {
            label: label.into(),
            action: Some(Box::new(action)),
        }
    }

    /// Run the item. Returns false for label-only items.
    pub fn activate(&mut self) -> bool {
        match self.action.as_mut() {
            Some(action) => {
                action();
                true
            }
            None => false,
        }
    }
}

/// What a row-menu renderer returns.
#[derive(Debug, Default)]
pub struct MenuContent {
    pub items: Vec<MenuItem>,
}

impl MenuContent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn labels(&self) -> Vec<String> {
        self.items.iter().map(|item| item.label.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Builds a row's menu content. Receives the row and a closer for it.
pub type RowMenuRenderer = Box<dyn FnMut(&Row, MenuCloser) -> MenuContent + Send>;

// =============================================================================
// RowMenu
// =============================================================================

/// Open/closed state of the row menus of one table.
#[derive(Debug, Default)]
pub struct RowMenu {
    open: Option<usize>,
    closer: MenuCloser,
    content: Option<MenuContent>,
}

impl RowMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the row whose menu is open.
    pub fn open_row(&self) -> Option<usize> {
        self.open
    }

    pub fn is_open(&self, row: usize) -> bool {
        self.open == Some(row)
    }

    /// Press the trigger on `row`: opens it, closes any other open menu,
    /// and closes it when it was already open. Returns the new open row.
    pub fn toggle(&mut self, row: usize) -> Option<usize> {
        if self.open == Some(row) {
            self.close();
        } else {
            self.open = Some(row);
            self.content = None;
            self.closer = MenuCloser::new();
        }
        self.open
    }

    /// Close whatever is open. Returns true if a menu was open.
    pub fn close(&mut self) -> bool {
        self.content = None;
        self.open.take().is_some()
    }

    /// A fresh closer for the currently open menu.
    pub fn closer(&self) -> MenuCloser {
        self.closer.clone()
    }

    /// Store the rendered content for the open menu.
    pub(crate) fn set_content(&mut self, content: MenuContent) {
        if self.open.is_some() {
            self.content = Some(content);
        }
    }

    pub fn content(&self) -> Option<&MenuContent> {
        self.content.as_ref()
    }

    /// Close the menu if any closer issued for it was invoked.
    /// Returns true if this closed the menu.
    pub fn apply_close_request(&mut self) -> bool {
        if self.closer.take() {
            return self.close();
        }
        false
    }

    /// Activate item `index` of the open menu.
    ///
    /// Returns true if an item action ran.
    pub fn activate(&mut self, index: usize) -> bool {
        let ran = self
            .content
            .as_mut()
            .and_then(|content| content.items.get_mut(index))
            .map(MenuItem::activate)
            .unwrap_or(false);
        self.apply_close_request();
        ran
    }
}
