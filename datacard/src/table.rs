//! Tabular data view with pagination, horizontal scroll and row menus.
//!
//! A table is built through one of two explicit paths:
//!
//! - [`LocalPaginatedTable`] owns the whole dataset and slices pages itself.
//! - [`RemotePaginatedTable`] shows exactly the page the caller supplies and
//!   forwards page changes to a callback. The caller stays the single source
//!   of truth for the current page.
//!
//! All state changes are synchronous and go through [`TableView::handle`].
//!
//! # Example
//!
//! ```ignore
//! let mut table = LocalPaginatedTable::new(
//!     vec![ColumnSpec::new("name", "Flock").title_column()],
//!     rows,
//! )
//! .with_items_per_page(10)?;
//!
//! table.handle(TableEvent::Resize { viewport_width: 300.0 });
//! table.handle(TableEvent::Navigate(NavControl::Next));
//! let frame = table.frame();
//! ```

use std::fmt;

use crate::column::{CellContent, ColumnSpec};
use crate::config::TableConfig;
use crate::error::TableError;
use crate::event::TableEvent;
use crate::frame::{FrameBody, FrameRow, MenuOverlay, PaginationBar, ScrollbarFrame, TableFrame};
use crate::layout::{SlotKind, TableLayout};
use crate::menu::{MenuCloser, MenuContent, RowMenu, RowMenuRenderer};
use crate::pagination::{total_pages, ControlState, NavControl, Pager};
use crate::row::Row;
use crate::scroll::{ScrollMetrics, ScrollThumb};

/// Callback receiving a row, for edit/delete/press actions.
pub type RowCallback = Box<dyn FnMut(&Row) + Send>;

/// Callback receiving the requested page in remote mode.
pub type PageChangeCallback = Box<dyn FnMut(usize) + Send>;

// =============================================================================
// PageSource
// =============================================================================

/// Where a table's rows and page number come from.
pub trait PageSource {
    fn total_records(&self) -> usize;

    fn active_page(&self) -> usize;

    /// Rows shown for the given pager.
    fn rows(&self, pager: &Pager) -> &[Row];

    /// Move to `page`. Only called with a valid page different from the
    /// active one.
    fn request_page(&mut self, page: usize);

    /// The page count is about to become `total_pages`. Sources that own
    /// the active page clamp it; sources whose page belongs to the caller
    /// reject a page that no longer exists.
    fn fit_page_count(&mut self, total_pages: usize) -> Result<(), TableError>;
}

/// Full dataset paginated by the table itself.
#[derive(Debug, Clone, Default)]
pub struct LocalPages {
    data: Vec<Row>,
    active_page: usize,
}

impl LocalPages {
    pub fn new(data: Vec<Row>) -> Self {
        Self {
            data,
            active_page: 1,
        }
    }

    pub fn data(&self) -> &[Row] {
        &self.data
    }

    fn clamp_page(&mut self, total_pages: usize) {
        self.active_page = self.active_page.clamp(1, total_pages.max(1));
    }
}

impl PageSource for LocalPages {
    fn total_records(&self) -> usize {
        self.data.len()
    }

    fn active_page(&self) -> usize {
        self.active_page
    }

    fn rows(&self, pager: &Pager) -> &[Row] {
        self.data.get(pager.window()).unwrap_or(&[])
    }

    fn request_page(&mut self, page: usize) {
        self.active_page = page;
    }

    fn fit_page_count(&mut self, total_pages: usize) -> Result<(), TableError> {
        self.clamp_page(total_pages);
        Ok(())
    }
}

/// One server-side page plus the callback that fetches others.
pub struct RemotePages {
    rows: Vec<Row>,
    total_records: usize,
    current_page: usize,
    on_page_change: PageChangeCallback,
}

impl fmt::Debug for RemotePages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemotePages")
            .field("rows", &self.rows.len())
            .field("total_records", &self.total_records)
            .field("current_page", &self.current_page)
            .finish_non_exhaustive()
    }
}

impl PageSource for RemotePages {
    fn total_records(&self) -> usize {
        self.total_records
    }

    fn active_page(&self) -> usize {
        self.current_page
    }

    fn rows(&self, _pager: &Pager) -> &[Row] {
        &self.rows
    }

    fn request_page(&mut self, page: usize) {
        (self.on_page_change)(page);
    }

    fn fit_page_count(&mut self, total_pages: usize) -> Result<(), TableError> {
        if self.current_page > total_pages {
            return Err(TableError::PageOutOfRange {
                page: self.current_page,
                total_pages,
            });
        }
        Ok(())
    }
}

// =============================================================================
// TableView
// =============================================================================

/// Table over a locally paginated dataset.
pub type LocalPaginatedTable = TableView<LocalPages>;

/// Table over server-paginated data.
pub type RemotePaginatedTable = TableView<RemotePages>;

/// A paginated, horizontally scrollable table.
pub struct TableView<S: PageSource> {
    columns: Vec<ColumnSpec>,
    source: S,
    config: TableConfig,
    layout: TableLayout,
    scroll: ScrollMetrics,
    menu: RowMenu,
    row_menu: Option<RowMenuRenderer>,
    on_edit: Option<RowCallback>,
    on_delete: Option<RowCallback>,
    on_row_press: Option<RowCallback>,
    warned_missing_menu: bool,
}

impl<S: PageSource + fmt::Debug> fmt::Debug for TableView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.columns)
            .field("source", &self.source)
            .field("config", &self.config)
            .field("scroll", &self.scroll)
            .field("open_menu", &self.menu.open_row())
            .finish_non_exhaustive()
    }
}

impl TableView<LocalPages> {
    /// Create a table that paginates `data` itself, 10 rows per page.
    pub fn new(columns: Vec<ColumnSpec>, data: Vec<Row>) -> Self {
        Self::from_source(columns, LocalPages::new(data))
    }

    /// Replace the dataset.
    ///
    /// The active page is kept (clamped to the new page count), not reset;
    /// callers that filter should call [`reset_page`](Self::reset_page).
    pub fn set_data(&mut self, data: Vec<Row>) {
        self.source.data = data;
        self.menu.close();
        self.source.clamp_page(self.total_pages());
    }

    /// Go back to page 1.
    pub fn reset_page(&mut self) {
        if self.source.active_page != 1 {
            self.menu.close();
            self.source.active_page = 1;
        }
    }

    pub fn data(&self) -> &[Row] {
        self.source.data()
    }
}

impl TableView<RemotePages> {
    /// Create a server-paginated table.
    ///
    /// Page presses call `on_page_change(page)`; the table never changes
    /// its current page on its own. Feed pages in with
    /// [`set_page`](Self::set_page).
    pub fn new<F>(columns: Vec<ColumnSpec>, on_page_change: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        let source = RemotePages {
            rows: Vec::new(),
            total_records: 0,
            current_page: 1,
            on_page_change: Box::new(on_page_change),
        };
        Self::from_source(columns, source)
    }

    /// Builder form of [`set_page`](Self::set_page).
    pub fn with_page(
        mut self,
        rows: Vec<Row>,
        total_records: usize,
        current_page: usize,
    ) -> Result<Self, TableError> {
        self.set_page(rows, total_records, current_page)?;
        Ok(self)
    }

    /// Show the rows of `current_page` out of `total_records`.
    pub fn set_page(
        &mut self,
        rows: Vec<Row>,
        total_records: usize,
        current_page: usize,
    ) -> Result<(), TableError> {
        let pages = total_pages(total_records, self.config.items_per_page);
        if current_page == 0 || current_page > pages {
            return Err(TableError::PageOutOfRange {
                page: current_page,
                total_pages: pages,
            });
        }
        self.menu.close();
        self.source.rows = rows;
        self.source.total_records = total_records;
        self.source.current_page = current_page;
        Ok(())
    }
}

impl<S: PageSource> TableView<S> {
    fn from_source(columns: Vec<ColumnSpec>, source: S) -> Self {
        let config = TableConfig::default();
        let mut table = Self {
            columns,
            source,
            scroll: ScrollMetrics::default().with_min_thumb_width(config.min_thumb_width),
            config,
            layout: TableLayout::default(),
            menu: RowMenu::new(),
            row_menu: None,
            on_edit: None,
            on_delete: None,
            on_row_press: None,
            warned_missing_menu: false,
        };
        table.relayout();
        table
    }

    /// Set rows per page.
    ///
    /// A remote table fails with [`TableError::PageOutOfRange`] if the
    /// caller's current page does not exist at the new page size.
    pub fn with_items_per_page(mut self, items_per_page: usize) -> Result<Self, TableError> {
        if items_per_page == 0 {
            return Err(TableError::InvalidPageSize(items_per_page));
        }
        self.source
            .fit_page_count(total_pages(self.source.total_records(), items_per_page))?;
        self.config.items_per_page = items_per_page;
        Ok(self)
    }

    /// Replace the whole configuration. Page checks as for
    /// [`with_items_per_page`](Self::with_items_per_page).
    pub fn with_config(mut self, config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        self.source.fit_page_count(total_pages(
            self.source.total_records(),
            config.items_per_page,
        ))?;
        self.scroll.set_min_thumb_width(config.min_thumb_width);
        self.config = config;
        self.relayout();
        Ok(self)
    }

    /// Set the renderer for the row menu opened by the trigger column.
    pub fn with_row_menu<F>(mut self, render: F) -> Self
    where
        F: FnMut(&Row, MenuCloser) -> MenuContent + Send + 'static,
    {
        self.row_menu = Some(Box::new(render));
        self
    }

    /// Show the edit icon and call `f` with the row when it is pressed.
    pub fn on_edit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Row) + Send + 'static,
    {
        self.on_edit = Some(Box::new(f));
        self.relayout();
        self
    }

    /// Show the delete icon and call `f` with the row when it is pressed.
    pub fn on_delete<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Row) + Send + 'static,
    {
        self.on_delete = Some(Box::new(f));
        self.relayout();
        self
    }

    pub fn on_row_press<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Row) + Send + 'static,
    {
        self.on_row_press = Some(Box::new(f));
        self
    }

    /// Report configurations that render but cannot work.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.row_menu.is_none()
            && let Some(column) = self.columns.iter().find(|c| c.show_dots)
        {
            return Err(TableError::MenuWithoutRenderer {
                column: column.key.clone(),
            });
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Columns and layout
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn set_columns(&mut self, columns: Vec<ColumnSpec>) {
        self.columns = columns;
        self.relayout();
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    pub fn content_width(&self) -> f32 {
        self.layout.content_width()
    }

    fn has_actions(&self) -> bool {
        self.on_edit.is_some() || self.on_delete.is_some()
    }

    fn relayout(&mut self) {
        self.layout = TableLayout::compute(&self.columns, self.has_actions(), &self.config);
        self.scroll.set_content_width(self.layout.content_width());
    }

    // -------------------------------------------------------------------------
    // Paging
    // -------------------------------------------------------------------------

    /// Paging numbers for the current state.
    pub fn pager(&self) -> Pager {
        let mut pager = Pager {
            items_per_page: self.config.items_per_page.max(1),
            active_page: self.source.active_page(),
            total_records: self.source.total_records(),
        };
        // Builders keep a remote page in range; this only guards the math.
        pager.active_page = pager.clamp_page(pager.active_page);
        pager
    }

    pub fn active_page(&self) -> usize {
        self.pager().active_page
    }

    pub fn total_pages(&self) -> usize {
        self.pager().total_pages()
    }

    pub fn total_records(&self) -> usize {
        self.source.total_records()
    }

    pub fn items_per_page(&self) -> usize {
        self.config.items_per_page
    }

    /// Rows on the current page.
    pub fn visible_rows(&self) -> &[Row] {
        self.source.rows(&self.pager())
    }

    /// Row `index` of the current page.
    pub fn row(&self, index: usize) -> Result<&Row, TableError> {
        let rows = self.visible_rows();
        rows.get(index).ok_or(TableError::RowOutOfRange {
            row: index,
            len: rows.len(),
        })
    }

    pub fn page_label(&self) -> String {
        self.pager().label()
    }

    pub fn is_enabled(&self, control: NavControl) -> bool {
        self.pager().is_enabled(control)
    }

    pub fn control_state(&self, control: NavControl) -> ControlState {
        ControlState {
            control,
            enabled: self.is_enabled(control),
        }
    }

    fn go_to(&mut self, page: usize) -> bool {
        log::debug!(
            "page change {} -> {} of {}",
            self.active_page(),
            page,
            self.total_pages()
        );
        self.menu.close();
        self.source.request_page(page);
        true
    }

    // -------------------------------------------------------------------------
    // Scroll and menu state
    // -------------------------------------------------------------------------

    pub fn scroll_metrics(&self) -> &ScrollMetrics {
        &self.scroll
    }

    pub fn thumb(&self) -> ScrollThumb {
        self.scroll.thumb()
    }

    /// Row whose menu is open.
    pub fn open_menu(&self) -> Option<usize> {
        self.menu.open_row()
    }

    /// Content of the open menu as of the last frame.
    pub fn menu_content(&self) -> Option<&MenuContent> {
        self.menu.content()
    }

    fn toggle_menu(&mut self, index: usize) -> bool {
        if !self.layout.has_menu() {
            return false;
        }
        let pager = self.pager();
        let Some(row) = self.source.rows(&pager).get(index) else {
            log::debug!("menu trigger on row {} outside the page", index);
            return false;
        };

        let opened = self.menu.toggle(index) == Some(index);
        log::debug!("row menu {} {}", index, if opened { "opened" } else { "closed" });

        for column in self.columns.iter().filter(|c| c.show_dots) {
            if let Some(ref callback) = column.on_dots_press {
                callback(row);
            }
        }
        if opened && self.row_menu.is_none() && !self.warned_missing_menu {
            log::warn!("row menu opened but no row menu renderer is set; showing nothing");
            self.warned_missing_menu = true;
        }
        true
    }

    fn call_row(&mut self, index: usize, which: RowAction) -> bool {
        let pager = self.pager();
        let Some(row) = self.source.rows(&pager).get(index) else {
            log::debug!("{:?} on row {} outside the page", which, index);
            return false;
        };
        let callback = match which {
            RowAction::Press => self.on_row_press.as_mut(),
            RowAction::Edit => self.on_edit.as_mut(),
            RowAction::Delete => self.on_delete.as_mut(),
        };
        match callback {
            Some(callback) => {
                callback(row);
                true
            }
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Apply one UI event. Returns true if view state changed or a callback
    /// ran.
    pub fn handle(&mut self, event: TableEvent) -> bool {
        match event {
            TableEvent::ScrollTo(offset) => self.scroll.set_offset(offset),
            TableEvent::ScrollBy(delta) => self.scroll.scroll_by(delta),
            TableEvent::Resize { viewport_width } => {
                let old = self.scroll.viewport_width();
                self.scroll.set_viewport_width(viewport_width);
                self.scroll.viewport_width() != old
            }
            TableEvent::Navigate(control) => match self.pager().target(control) {
                Some(page) => self.go_to(page),
                None => false,
            },
            TableEvent::GoToPage(page) => match self.pager().resolve_request(page) {
                Some(page) => self.go_to(page),
                None => false,
            },
            TableEvent::ToggleMenu(index) => self.toggle_menu(index),
            TableEvent::CloseMenu => self.menu.close(),
            TableEvent::ActivateMenuItem(item) => {
                let was_open = self.menu.open_row().is_some();
                let ran = self.menu.activate(item);
                ran || was_open != self.menu.open_row().is_some()
            }
            TableEvent::PressRow(index) => self.call_row(index, RowAction::Press),
            TableEvent::Edit(index) => self.call_row(index, RowAction::Edit),
            TableEvent::Delete(index) => self.call_row(index, RowAction::Delete),
        }
    }

    // -------------------------------------------------------------------------
    // Frame
    // -------------------------------------------------------------------------

    /// Build the render model for the current state.
    ///
    /// Runs the row-menu renderer for the open menu; a renderer that closes
    /// its menu takes effect before the frame is returned.
    pub fn frame(&mut self) -> TableFrame {
        let pager = self.pager();
        let rows = self.source.rows(&pager);

        if let Some(open) = self.menu.open_row() {
            match rows.get(open) {
                Some(row) => {
                    if let Some(render) = self.row_menu.as_mut() {
                        let content = render(row, self.menu.closer());
                        self.menu.set_content(content);
                        self.menu.apply_close_request();
                    }
                }
                None => {
                    self.menu.close();
                }
            }
        }

        let body = if rows.is_empty() {
            FrameBody::Empty {
                message: self.config.empty_message.clone(),
            }
        } else {
            let edit = self.on_edit.is_some();
            let delete = self.on_delete.is_some();
            let frame_rows = rows
                .iter()
                .enumerate()
                .map(|(index, row)| {
                    let menu_open = self.menu.is_open(index);
                    let cells = self
                        .layout
                        .slots
                        .iter()
                        .map(|slot| match &slot.kind {
                            SlotKind::Menu => CellContent::MenuTrigger { open: menu_open },
                            SlotKind::Data { column, .. } => self.columns[*column].render_cell(row),
                            SlotKind::Actions => CellContent::Actions { edit, delete },
                        })
                        .collect();
                    FrameRow {
                        index,
                        cells,
                        menu_open,
                    }
                })
                .collect();
            FrameBody::Rows(frame_rows)
        };

        let menu = self.menu.open_row().map(|row| MenuOverlay {
            row,
            anchor_x: self.config.menu_column_width,
            items: self
                .menu
                .content()
                .map(MenuContent::labels)
                .unwrap_or_default(),
        });

        TableFrame {
            slots: self.layout.slots.clone(),
            body,
            pagination: PaginationBar {
                label: pager.label(),
                active_page: pager.active_page,
                total_pages: pager.total_pages(),
                controls: pager.controls(),
            },
            scrollbar: ScrollbarFrame {
                offset_x: self.scroll.offset_x(),
                content_width: self.scroll.content_width(),
                track_width: self.scroll.viewport_width(),
                thumb: self.scroll.thumb(),
            },
            menu,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum RowAction {
    Press,
    Edit,
    Delete,
}
