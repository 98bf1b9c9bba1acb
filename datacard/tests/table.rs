use std::sync::{Arc, Mutex};

use datacard::{
    CellContent, ColumnSpec, LocalPaginatedTable, NavControl, RemotePaginatedTable, Row,
    TableConfig, TableError, TableEvent, PLACEHOLDER,
};

fn flock(id: usize) -> Row {
    Row::new()
        .with("id", id as u64)
        .with("name", format!("Flock {}", id))
        .with("birds", (id * 100) as u64)
}

fn flocks(n: usize) -> Vec<Row> {
    (1..=n).map(flock).collect()
}

fn columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("name", "Flock").title_column(),
        ColumnSpec::new("birds", "Birds").width(80.0),
    ]
}

fn ids(rows: &[Row]) -> Vec<String> {
    rows.iter().map(|r| r.display("id")).collect()
}

// ============================================================================
// Local pagination
// ============================================================================

#[test]
fn test_local_slices_pages() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(23));
    assert_eq!(table.items_per_page(), 10);
    assert_eq!(table.total_pages(), 3);
    assert_eq!(table.visible_rows().len(), 10);

    assert!(table.handle(TableEvent::Navigate(NavControl::Last)));
    assert_eq!(table.active_page(), 3);
    assert_eq!(ids(table.visible_rows()), vec!["21", "22", "23"]);
    assert_eq!(table.page_label(), "21 – 23 of 23");
}

#[test]
fn test_local_next_and_previous() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(23));
    table.handle(TableEvent::Navigate(NavControl::Next));
    assert_eq!(table.active_page(), 2);
    assert_eq!(ids(table.visible_rows())[0], "11");

    table.handle(TableEvent::Navigate(NavControl::Previous));
    assert_eq!(table.active_page(), 1);
}

#[test]
fn test_local_disabled_controls_do_nothing() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(23));
    assert!(!table.handle(TableEvent::Navigate(NavControl::Previous)));
    assert!(!table.handle(TableEvent::Navigate(NavControl::First)));
    assert_eq!(table.active_page(), 1);

    table.handle(TableEvent::Navigate(NavControl::Last));
    assert!(!table.handle(TableEvent::Navigate(NavControl::Next)));
    assert_eq!(table.active_page(), 3);

    let next = table.control_state(NavControl::Next);
    assert_eq!(next.control, NavControl::Next);
    assert!(!next.enabled);
    assert!(table.control_state(NavControl::First).enabled);
}

#[test]
fn test_local_go_to_page_is_clamped() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(23));
    assert!(table.handle(TableEvent::GoToPage(42)));
    assert_eq!(table.active_page(), 3);
    assert!(table.handle(TableEvent::GoToPage(0)));
    assert_eq!(table.active_page(), 1);
    assert!(!table.handle(TableEvent::GoToPage(1)));
}

#[test]
fn test_custom_page_size() {
    let table = LocalPaginatedTable::new(columns(), flocks(23))
        .with_items_per_page(5)
        .unwrap();
    assert_eq!(table.total_pages(), 5);
    assert_eq!(table.visible_rows().len(), 5);
}

#[test]
fn test_zero_page_size_is_an_error() {
    let result = LocalPaginatedTable::new(columns(), flocks(3)).with_items_per_page(0);
    assert!(matches!(result, Err(TableError::InvalidPageSize(0))));
}

#[test]
fn test_set_data_keeps_page_but_stays_in_range() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(45));
    table.handle(TableEvent::GoToPage(3));

    table.set_data(flocks(40));
    assert_eq!(table.active_page(), 3);

    table.set_data(flocks(12));
    assert_eq!(table.active_page(), 2);

    table.reset_page();
    assert_eq!(table.active_page(), 1);
}

#[test]
fn test_empty_dataset() {
    let mut table = LocalPaginatedTable::new(columns(), Vec::new());
    assert_eq!(table.total_pages(), 1);
    assert_eq!(table.active_page(), 1);
    assert!(!table.handle(TableEvent::Navigate(NavControl::Next)));
    assert_eq!(table.active_page(), 1);

    let frame = table.frame();
    assert!(frame.is_empty());
    assert!(frame.header().is_none());
    assert_eq!(frame.pagination.label, "1 – 0 of 0");
    assert!(frame.pagination.controls.iter().all(|c| !c.enabled));
}

// ============================================================================
// Remote pagination
// ============================================================================

#[test]
fn test_remote_next_calls_back_without_slicing() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let sink = requests.clone();

    // A server page that is longer than items_per_page is shown verbatim
    let mut table = RemotePaginatedTable::new(columns(), move |page| {
        sink.lock().unwrap().push(page);
    })
    .with_page(flocks(12), 50, 2)
    .unwrap();

    assert_eq!(table.visible_rows().len(), 12);
    assert_eq!(table.page_label(), "11 – 20 of 50");

    assert!(table.handle(TableEvent::Navigate(NavControl::Next)));
    assert_eq!(*requests.lock().unwrap(), vec![3]);
    // The caller owns the page until it feeds the next one
    assert_eq!(table.active_page(), 2);
    assert_eq!(table.visible_rows().len(), 12);

    table.set_page(flocks(10), 50, 3).unwrap();
    assert_eq!(table.active_page(), 3);
}

#[test]
fn test_remote_rejects_out_of_range_requests() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let sink = requests.clone();
    let mut table = RemotePaginatedTable::new(columns(), move |page| {
        sink.lock().unwrap().push(page);
    })
    .with_page(flocks(10), 30, 3)
    .unwrap();

    assert!(!table.handle(TableEvent::Navigate(NavControl::Next)));
    assert!(!table.handle(TableEvent::Navigate(NavControl::Last)));
    assert!(!table.handle(TableEvent::GoToPage(9)));
    assert!(table.handle(TableEvent::GoToPage(0)));
    assert_eq!(*requests.lock().unwrap(), vec![1]);
}

#[test]
fn test_remote_set_page_validates_current_page() {
    let mut table = RemotePaginatedTable::new(columns(), |_| {});
    assert_eq!(
        table.set_page(flocks(10), 30, 4),
        Err(TableError::PageOutOfRange {
            page: 4,
            total_pages: 3
        })
    );
    assert!(table.set_page(flocks(10), 30, 0).is_err());
    assert!(table.set_page(Vec::new(), 0, 1).is_ok());
    assert_eq!(table.page_label(), "1 – 0 of 0");
}

#[test]
fn test_remote_page_size_change_keeps_caller_page() {
    let result = RemotePaginatedTable::new(columns(), |_| {})
        .with_page(flocks(10), 50, 5)
        .unwrap()
        .with_items_per_page(25);
    assert!(matches!(
        result,
        Err(TableError::PageOutOfRange {
            page: 5,
            total_pages: 2
        })
    ));

    let config = TableConfig {
        items_per_page: 25,
        ..TableConfig::default()
    };
    let result = RemotePaginatedTable::new(columns(), |_| {})
        .with_page(flocks(10), 50, 5)
        .unwrap()
        .with_config(config);
    assert!(matches!(result, Err(TableError::PageOutOfRange { .. })));
}

#[test]
fn test_remote_page_size_change_within_range() {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let sink = requests.clone();
    let mut table = RemotePaginatedTable::new(columns(), move |page| {
        sink.lock().unwrap().push(page);
    })
    .with_page(flocks(25), 50, 2)
    .unwrap()
    .with_items_per_page(25)
    .unwrap();

    assert_eq!(table.active_page(), 2);
    assert_eq!(table.page_label(), "26 – 50 of 50");
    assert!(table.handle(TableEvent::Navigate(NavControl::Previous)));
    assert_eq!(*requests.lock().unwrap(), vec![1]);
}

#[test]
fn test_local_page_size_change_clamps_page() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(50));
    table.handle(TableEvent::GoToPage(5));
    let table = table.with_items_per_page(25).unwrap();
    assert_eq!(table.active_page(), 2);
}

#[test]
fn test_local_mode_calls_no_callback() {
    // Local tables have no page callback at all; paging only moves local state
    let mut table = LocalPaginatedTable::new(columns(), flocks(30));
    table.handle(TableEvent::Navigate(NavControl::Next));
    assert_eq!(table.active_page(), 2);
    assert_eq!(ids(table.visible_rows())[0], "11");
}

// ============================================================================
// Columns and layout
// ============================================================================

#[test]
fn test_default_column_width() {
    let table = LocalPaginatedTable::new(vec![ColumnSpec::new("name", "Flock")], flocks(1));
    assert_eq!(table.content_width(), 120.0);
}

#[test]
fn test_content_width_includes_fixed_columns() {
    let columns = vec![
        ColumnSpec::new("name", "Flock").show_dots(),
        ColumnSpec::new("birds", "Birds").width(80.0),
        ColumnSpec::new("house", "House"),
    ];
    let table = LocalPaginatedTable::new(columns, flocks(1))
        .on_edit(|_| {})
        .on_delete(|_| {});
    // 50 menu + 120 + 80 + 120 + 100 actions
    assert_eq!(table.content_width(), 470.0);
    assert_eq!(table.scroll_metrics().content_width(), 470.0);

    let xs: Vec<f32> = table.layout().slots.iter().map(|s| s.x).collect();
    assert_eq!(xs, vec![0.0, 50.0, 170.0, 250.0, 370.0]);
}

#[test]
fn test_config_widths() {
    let config = TableConfig {
        default_column_width: 90.0,
        ..TableConfig::default()
    };
    let table = LocalPaginatedTable::new(columns(), flocks(1))
        .with_config(config)
        .unwrap();
    assert_eq!(table.content_width(), 170.0);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = TableConfig {
        menu_column_width: f32::NAN,
        ..TableConfig::default()
    };
    let result = LocalPaginatedTable::new(columns(), flocks(1)).with_config(config);
    assert!(matches!(result, Err(TableError::InvalidWidth { .. })));
}

#[test]
fn test_duplicate_keys_render_independently() {
    let columns = vec![
        ColumnSpec::new("name", "Flock"),
        ColumnSpec::new("name", "Flock again").custom(|value, _| {
            CellContent::text(format!("<{}>", value.and_then(|v| v.as_str()).unwrap_or("")))
        }),
    ];
    let mut table = LocalPaginatedTable::new(columns, flocks(1));
    let frame = table.frame();
    let cells = &frame.rows()[0].cells;
    assert_eq!(cells[0].label(), Some("Flock 1"));
    assert_eq!(cells[1].label(), Some("<Flock 1>"));
}

#[test]
fn test_frame_cells_follow_slots() {
    let columns = vec![
        ColumnSpec::new("name", "Flock").title_column().show_dots(),
        ColumnSpec::new("missing", "Notes"),
    ];
    let mut table = LocalPaginatedTable::new(columns, flocks(2))
        .with_row_menu(|_, _| Default::default())
        .on_delete(|_| {});
    let frame = table.frame();

    assert_eq!(frame.header(), Some(vec!["", "Flock", "Notes", ""]));
    let cells = &frame.rows()[1].cells;
    assert_eq!(cells[0], CellContent::MenuTrigger { open: false });
    assert_eq!(
        cells[1],
        CellContent::Text {
            text: "Flock 2".into(),
            bold: true
        }
    );
    assert_eq!(cells[2].label(), Some(PLACEHOLDER));
    assert_eq!(
        cells[3],
        CellContent::Actions {
            edit: false,
            delete: true
        }
    );
}

// ============================================================================
// Scrolling
// ============================================================================

#[test]
fn test_scroll_events_drive_thumb() {
    let columns: Vec<ColumnSpec> = (0..10)
        .map(|i| ColumnSpec::new(format!("c{}", i), format!("C{}", i)))
        .collect();
    let mut table = LocalPaginatedTable::new(columns, flocks(3));
    assert_eq!(table.content_width(), 1200.0);

    assert!(table.handle(TableEvent::Resize {
        viewport_width: 300.0
    }));
    assert_eq!(table.thumb().width, 75.0);

    assert!(table.handle(TableEvent::ScrollTo(450.0)));
    assert_eq!(table.thumb().offset, 112.5);

    assert!(table.handle(TableEvent::ScrollBy(-450.0)));
    assert_eq!(table.thumb().offset, 0.0);

    let frame = table.frame();
    assert_eq!(frame.scrollbar.track_width, 300.0);
    assert_eq!(frame.scrollbar.thumb.width, 75.0);
}

#[test]
fn test_scroll_without_overflow_stays_at_zero() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(3));
    table.handle(TableEvent::Resize {
        viewport_width: 600.0,
    });
    assert!(!table.handle(TableEvent::ScrollTo(100.0)));
    assert_eq!(table.thumb().width, 600.0);
    assert_eq!(table.thumb().offset, 0.0);
}

// ============================================================================
// Row actions
// ============================================================================

#[test]
fn test_row_callbacks_receive_row() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let (edit, delete, press) = (seen.clone(), seen.clone(), seen.clone());

    let mut table = LocalPaginatedTable::new(columns(), flocks(23))
        .on_edit(move |row| edit.lock().unwrap().push(format!("edit {}", row.display("id"))))
        .on_delete(move |row| delete.lock().unwrap().push(format!("delete {}", row.display("id"))))
        .on_row_press(move |row| press.lock().unwrap().push(format!("press {}", row.display("id"))));

    table.handle(TableEvent::Navigate(NavControl::Next));
    assert!(table.handle(TableEvent::Edit(0)));
    assert!(table.handle(TableEvent::Delete(2)));
    assert!(table.handle(TableEvent::PressRow(9)));
    // Not on this page
    assert!(!table.handle(TableEvent::PressRow(10)));

    assert_eq!(
        *seen.lock().unwrap(),
        vec!["edit 11", "delete 13", "press 20"]
    );
}

#[test]
fn test_row_lookup_out_of_range() {
    let table = LocalPaginatedTable::new(columns(), flocks(3));
    assert!(table.row(2).is_ok());
    assert_eq!(
        table.row(3),
        Err(TableError::RowOutOfRange { row: 3, len: 3 })
    );
}

#[test]
fn test_missing_callbacks_are_ignored() {
    let mut table = LocalPaginatedTable::new(columns(), flocks(3));
    assert!(!table.handle(TableEvent::Edit(0)));
    assert!(!table.layout().has_actions());
}

#[test]
fn test_visible_slots_follow_scroll() {
    let table = LocalPaginatedTable::new(columns(), flocks(3));
    // Flock 0..120, Birds 120..200
    let titles = |offset, viewport| -> Vec<String> {
        table
            .layout()
            .visible(offset, viewport)
            .map(|slot| slot.title().to_string())
            .collect()
    };
    assert_eq!(titles(0.0, 100.0), vec!["Flock"]);
    assert_eq!(titles(100.0, 100.0), vec!["Flock", "Birds"]);
    assert_eq!(titles(120.0, 100.0), vec!["Birds"]);
}
