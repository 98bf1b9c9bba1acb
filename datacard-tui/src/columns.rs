//! Column definitions and row menus for the console screens.

use datacard::{
    BadgeStyle, CellContent, ColumnSpec, MenuCloser, MenuContent, MenuItem, PLACEHOLDER, Row, Tone,
};
use serde_json::Value;

use crate::action::{self, ActionSender, HostAction, ScreenId, Verb};

/// Mortality above this share of the flock is flagged.
const MORTALITY_ALERT_PCT: f64 = 5.0;

pub fn flock_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("name", "Flock").title_column().show_dots().width(130.0),
        ColumnSpec::new("house", "House").width(110.0),
        ColumnSpec::new("breed", "Breed").width(140.0),
        ColumnSpec::new("birds", "Birds")
            .width(90.0)
            .custom(|value, _| CellContent::text(number_or_placeholder(value, group_thousands))),
        ColumnSpec::new("age_weeks", "Age")
            .width(80.0)
            .custom(|value, _| {
                CellContent::text(number_or_placeholder(value, |n| format!("{} wk", n)))
            }),
        ColumnSpec::new("status", "Status").badge(
            BadgeStyle::new(Tone::Neutral)
                .tone("active", Tone::Success)
                .tone("quarantine", Tone::Warning)
                .tone("sold", Tone::Info),
        ),
        ColumnSpec::new("mortality_pct", "Mortality")
            .width(100.0)
            .custom(mortality_cell),
        ColumnSpec::new("notes", "Notes").width(200.0),
    ]
}

pub fn voucher_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("number", "Voucher").title_column().show_dots().width(110.0),
        ColumnSpec::new("supplier", "Supplier").width(190.0),
        ColumnSpec::new("issued", "Issued").width(110.0),
        ColumnSpec::new("amount", "Amount").width(120.0).custom(|value, _| {
            match value.and_then(Value::as_f64) {
                Some(amount) => CellContent::text(money(amount)),
                None => CellContent::text(PLACEHOLDER),
            }
        }),
        ColumnSpec::new("status", "Status").badge(
            BadgeStyle::new(Tone::Neutral)
                .tone("pending", Tone::Warning)
                .tone("approved", Tone::Info)
                .tone("paid", Tone::Success)
                .tone("void", Tone::Danger),
        ),
        ColumnSpec::new("reference", "Reference").width(300.0).link(),
    ]
}

fn mortality_cell(value: Option<&Value>, _row: &Row) -> CellContent {
    match value.and_then(Value::as_f64) {
        Some(pct) if pct > MORTALITY_ALERT_PCT => CellContent::Badge {
            text: format!("{:.1}%", pct),
            tone: Tone::Danger,
        },
        Some(pct) => CellContent::text(format!("{:.1}%", pct)),
        None => CellContent::text(PLACEHOLDER),
    }
}

fn number_or_placeholder(value: Option<&Value>, format: impl Fn(u64) -> String) -> String {
    value
        .and_then(Value::as_u64)
        .map(format)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// `12345` as `12,345`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Currency amount with two decimals and grouped thousands.
pub fn money(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Row menu offering View, Edit and Delete. Every item closes the menu.
pub fn row_menu(
    tx: ActionSender,
    screen: ScreenId,
) -> impl FnMut(&Row, MenuCloser) -> MenuContent + Send + 'static {
    move |row: &Row, closer: MenuCloser| {
        [Verb::View, Verb::Edit, Verb::Delete]
            .into_iter()
            .fold(MenuContent::new(), |menu, verb| {
                let action = HostAction::row(verb, screen, row);
                let tx = tx.clone();
                let closer = closer.clone();
                menu.item(MenuItem::action(verb.label(), move || {
                    action::send(&tx, action.clone());
                    closer.close();
                }))
            })
    }
}

/// Row callback forwarding `verb` to the console.
pub fn row_callback(
    tx: ActionSender,
    verb: Verb,
    screen: ScreenId,
) -> impl FnMut(&Row) + Send + 'static {
    move |row: &Row| action::send(&tx, HostAction::row(verb, screen, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use datacard::{LocalPaginatedTable, TableEvent};
    use tokio::sync::mpsc;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn test_money() {
        assert_eq!(money(1234.5), "$1,234.50");
        assert_eq!(money(0.07), "$0.07");
        assert_eq!(money(-15.0), "-$15.00");
    }

    #[test]
    fn test_mortality_alert_is_a_badge() {
        let row = Row::new();
        assert_eq!(
            mortality_cell(Some(&Value::from(7.34)), &row),
            CellContent::Badge {
                text: "7.3%".into(),
                tone: Tone::Danger
            }
        );
        assert_eq!(
            mortality_cell(Some(&Value::from(1.0)), &row),
            CellContent::text("1.0%")
        );
        assert_eq!(mortality_cell(None, &row), CellContent::text(PLACEHOLDER));
    }

    #[test]
    fn test_columns_render_missing_values_as_placeholder() {
        let row = Row::new().with("name", "Flock 001");
        for column in flock_columns().iter().chain(voucher_columns().iter()) {
            if column.key == "status" {
                continue;
            }
            let cell = column.render_cell(&row);
            if column.key != "name" {
                assert_eq!(cell.label(), Some(PLACEHOLDER), "column {}", column.key);
            }
        }
    }

    #[test]
    fn test_menu_item_sends_action_and_closes() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let rows = vec![Row::new().with("id", 7).with("name", "Flock 007")];
        let mut table = LocalPaginatedTable::new(flock_columns(), rows)
            .with_row_menu(row_menu(tx, ScreenId::Flocks));

        table.handle(TableEvent::ToggleMenu(0));
        let frame = table.frame();
        assert_eq!(frame.menu.unwrap().items, vec!["View", "Edit", "Delete"]);

        assert!(table.handle(TableEvent::ActivateMenuItem(2)));
        assert_eq!(table.open_menu(), None);
        assert_eq!(
            rx.try_recv().unwrap(),
            HostAction::Row {
                verb: Verb::Delete,
                screen: ScreenId::Flocks,
                id: Some(7),
                label: "Flock 007".into(),
            }
        );
    }

    #[test]
    fn test_row_callback_sends_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let rows = vec![Row::new().with("id", 3).with("number", "VCH-0003")];
        let mut table = LocalPaginatedTable::new(voucher_columns(), rows)
            .on_edit(row_callback(tx, Verb::Edit, ScreenId::Vouchers));

        assert!(table.handle(TableEvent::Edit(0)));
        match rx.try_recv().unwrap() {
            HostAction::Row { verb, label, .. } => {
                assert_eq!(verb, Verb::Edit);
                assert_eq!(label, "VCH-0003");
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
