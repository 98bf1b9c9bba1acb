//! Requests the tables send back to the console.
//!
//! Table callbacks cannot borrow the app, so they push a [`HostAction`] onto
//! an unbounded channel that the event loop drains after every input.

use datacard::Row;
use tokio::sync::mpsc::UnboundedSender;

pub type ActionSender = UnboundedSender<HostAction>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenId {
    Flocks,
    Vouchers,
}

impl ScreenId {
    pub fn title(self) -> &'static str {
        match self {
            ScreenId::Flocks => "Flocks",
            ScreenId::Vouchers => "Vouchers",
        }
    }

    /// Row field naming a record in the status line.
    pub fn label_key(self) -> &'static str {
        match self {
            ScreenId::Flocks => "name",
            ScreenId::Vouchers => "number",
        }
    }

    pub fn next(self) -> Self {
        match self {
            ScreenId::Flocks => ScreenId::Vouchers,
            ScreenId::Vouchers => ScreenId::Flocks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    View,
    Edit,
    Delete,
    Press,
}

impl Verb {
    /// Menu item label.
    pub fn label(self) -> &'static str {
        match self {
            Verb::View => "View",
            Verb::Edit => "Edit",
            Verb::Delete => "Delete",
            Verb::Press => "Open",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostAction {
    /// A row callback or menu item fired.
    Row {
        verb: Verb,
        screen: ScreenId,
        id: Option<u64>,
        label: String,
    },
    /// The voucher table asked for another page.
    FetchVouchers(usize),
}

impl HostAction {
    pub fn row(verb: Verb, screen: ScreenId, row: &Row) -> Self {
        HostAction::Row {
            verb,
            screen,
            id: row.get("id").and_then(|v| v.as_u64()),
            label: row.display(screen.label_key()),
        }
    }
}

/// Send an action, logging when the console is already gone.
pub fn send(tx: &ActionSender, action: HostAction) {
    if let Err(e) = tx.send(action) {
        log::debug!("dropped host action {:?}: receiver closed", e.0);
    }
}
