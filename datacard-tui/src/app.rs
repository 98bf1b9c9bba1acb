//! The farm console: two table screens, key handling and the event loop.

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use datacard::render::viewport_px;
use datacard::{
    Buffer, LocalPaginatedTable, NavControl, PageSource, Paint, Rect, RemotePaginatedTable,
    RenderOptions, TableEvent, TableTheme, TableView, TextStyle, render_table,
};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::action::{HostAction, ScreenId, Verb};
use crate::api::{VoucherApi, VoucherPage};
use crate::columns;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::farm::{self, Flock, FlockStatus, VoucherStatus};
use crate::terminal::Terminal;

/// Horizontal scroll per key press, in terminal columns.
const SCROLL_STEP_CELLS: f32 = 6.0;

/// A voucher page tagged with the request that produced it.
#[derive(Debug)]
pub struct PageResponse {
    pub request: u64,
    pub page: VoucherPage,
}

struct FlockScreen {
    table: LocalPaginatedTable,
    cursor: usize,
    register: Vec<Flock>,
    filter: Option<FlockStatus>,
}

impl FlockScreen {
    fn filtered_rows(&self) -> Vec<datacard::Row> {
        self.register
            .iter()
            .filter(|f| self.filter.is_none_or(|s| f.status == s))
            .map(farm::to_row)
            .collect()
    }

    /// Push the register into the table. Filter changes go back to page 1.
    fn refresh(&mut self, reset_page: bool) {
        let rows = self.filtered_rows();
        self.table.set_data(rows);
        if reset_page {
            self.table.reset_page();
        }
    }
}

struct VoucherScreen {
    table: RemotePaginatedTable,
    cursor: usize,
    filter: Option<VoucherStatus>,
    /// Tag of the newest page request; older responses are dropped.
    latest_request: u64,
    loading: bool,
}

pub struct App {
    screen: ScreenId,
    flocks: FlockScreen,
    vouchers: VoucherScreen,
    api: VoucherApi,
    actions: UnboundedReceiver<HostAction>,
    pages: UnboundedSender<PageResponse>,
    theme: TableTheme,
    px_per_cell: f32,
    per_page: usize,
    status: String,
    quit: bool,
}

impl App {
    pub fn new(config: AppConfig, pages: UnboundedSender<PageResponse>) -> Result<Self, AppError> {
        let (tx, actions) = mpsc::unbounded_channel();

        let register = farm::flocks(config.record_count);
        let flock_table = LocalPaginatedTable::new(columns::flock_columns(), Vec::new())
            .with_config(config.table.clone())?
            .with_row_menu(columns::row_menu(tx.clone(), ScreenId::Flocks))
            .on_edit(columns::row_callback(tx.clone(), Verb::Edit, ScreenId::Flocks))
            .on_delete(columns::row_callback(tx.clone(), Verb::Delete, ScreenId::Flocks))
            .on_row_press(columns::row_callback(tx.clone(), Verb::Press, ScreenId::Flocks));
        flock_table.validate()?;

        let page_tx = tx.clone();
        let voucher_table = RemotePaginatedTable::new(columns::voucher_columns(), move |page| {
            crate::action::send(&page_tx, HostAction::FetchVouchers(page));
        })
        .with_config(config.table.clone())?
        .with_row_menu(columns::row_menu(tx.clone(), ScreenId::Vouchers))
        .on_edit(columns::row_callback(tx.clone(), Verb::Edit, ScreenId::Vouchers))
        .on_delete(columns::row_callback(tx.clone(), Verb::Delete, ScreenId::Vouchers))
        .on_row_press(columns::row_callback(tx.clone(), Verb::Press, ScreenId::Vouchers));
        voucher_table.validate()?;

        let mut flocks = FlockScreen {
            table: flock_table,
            cursor: 0,
            register,
            filter: None,
        };
        flocks.refresh(true);

        Ok(Self {
            screen: ScreenId::Flocks,
            flocks,
            vouchers: VoucherScreen {
                table: voucher_table,
                cursor: 0,
                filter: None,
                latest_request: 0,
                loading: false,
            },
            api: VoucherApi::new(farm::vouchers(config.record_count), config.api_latency()),
            actions,
            pages,
            theme: TableTheme::default(),
            px_per_cell: config.px_per_cell,
            per_page: config.table.items_per_page,
            status: String::from("Tab switches screens, q quits"),
            quit: false,
        })
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    pub fn on_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.on_key(key);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Tab => {
                self.screen = self.screen.next();
                log::debug!("switched to {}", self.screen.title());
            }
            KeyCode::Char('f') => self.cycle_filter(),
            _ => {
                let step = SCROLL_STEP_CELLS * self.px_per_cell;
                match self.screen {
                    ScreenId::Flocks => {
                        table_key(&mut self.flocks.table, &mut self.flocks.cursor, key, step)
                    }
                    ScreenId::Vouchers => {
                        table_key(&mut self.vouchers.table, &mut self.vouchers.cursor, key, step)
                    }
                };
            }
        }
        self.drain_actions();
    }

    fn cycle_filter(&mut self) {
        match self.screen {
            ScreenId::Flocks => {
                self.flocks.filter = next_filter(self.flocks.filter, &FlockStatus::ALL);
                self.flocks.cursor = 0;
                self.flocks.refresh(true);
                self.status = format!(
                    "Showing {} flocks",
                    self.flocks.filter.map_or("all", FlockStatus::label)
                );
            }
            ScreenId::Vouchers => {
                self.vouchers.filter = next_filter(self.vouchers.filter, &VoucherStatus::ALL);
                self.vouchers.cursor = 0;
                self.status = format!(
                    "Showing {} vouchers",
                    self.vouchers.filter.map_or("all", VoucherStatus::label)
                );
                // The filter changes the result set: go back to page 1
                self.request_vouchers(1);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Host actions and paging
    // -------------------------------------------------------------------------

    /// Apply everything the tables sent since the last call.
    pub fn drain_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            log::debug!("host action {:?}", action);
            match action {
                HostAction::FetchVouchers(page) => self.request_vouchers(page),
                HostAction::Row {
                    verb,
                    screen,
                    id,
                    label,
                } => self.on_row_action(verb, screen, id, label),
            }
        }
    }

    fn on_row_action(&mut self, verb: Verb, screen: ScreenId, id: Option<u64>, label: String) {
        self.status = match verb {
            Verb::View => format!("Viewing {}", label),
            Verb::Edit => format!("Editing {}", label),
            Verb::Press => format!("Opened {}", label),
            Verb::Delete => match (screen, id) {
                (ScreenId::Flocks, Some(id)) => {
                    self.flocks.register.retain(|f| u64::from(f.id) != id);
                    self.flocks.refresh(false);
                    format!("Deleted {}", label)
                }
                _ => format!("Delete requested for {}", label),
            },
        };
    }

    /// Start fetching voucher page `page`.
    pub fn request_vouchers(&mut self, page: usize) {
        self.vouchers.latest_request += 1;
        self.vouchers.loading = true;

        let request = self.vouchers.latest_request;
        let api = self.api.clone();
        let pages = self.pages.clone();
        let per_page = self.per_page;
        let filter = self.vouchers.filter;
        log::debug!("requesting voucher page {} (request {})", page, request);

        tokio::spawn(async move {
            let page = api.fetch_page(page, per_page, filter).await;
            if pages.send(PageResponse { request, page }).is_err() {
                log::debug!("voucher page {} arrived after shutdown", request);
            }
        });
    }

    /// Show a fetched page if it answers the newest request.
    pub fn on_page(&mut self, response: PageResponse) {
        if response.request != self.vouchers.latest_request {
            log::debug!(
                "dropping stale voucher page (request {}, latest {})",
                response.request,
                self.vouchers.latest_request
            );
            return;
        }

        self.vouchers.loading = false;
        let VoucherPage {
            page,
            rows,
            total_records,
        } = response.page;
        match self.vouchers.table.set_page(rows, total_records, page) {
            Ok(()) => self.vouchers.cursor = 0,
            Err(e) => {
                log::error!("rejected voucher page: {}", e);
                self.status = format!("Could not show vouchers: {}", e);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    pub fn render(&mut self, buf: &mut Buffer) {
        let area = buf.area();
        if area.height < 5 || area.width < 10 {
            return;
        }

        self.render_tabs(Rect::new(0, 0, area.width, 1), buf);

        let table_area = Rect::new(0, 1, area.width, area.height - 2);
        let px_per_cell = self.px_per_cell;
        match self.screen {
            ScreenId::Flocks => draw_table(
                &mut self.flocks.table,
                &mut self.flocks.cursor,
                table_area,
                buf,
                &self.theme,
                px_per_cell,
            ),
            ScreenId::Vouchers => draw_table(
                &mut self.vouchers.table,
                &mut self.vouchers.cursor,
                table_area,
                buf,
                &self.theme,
                px_per_cell,
            ),
        }

        self.render_status(Rect::new(0, area.height - 1, area.width, 1), buf);
    }

    fn render_tabs(&self, area: Rect, buf: &mut Buffer) {
        let base = Paint::new(self.theme.text, self.theme.header_bg);
        buf.fill(area, base);

        let mut x = area.x as i32 + 1;
        for screen in [ScreenId::Flocks, ScreenId::Vouchers] {
            let paint = if screen == self.screen {
                Paint::new(self.theme.background, self.theme.menu_border)
                    .with_style(TextStyle::new().bold())
            } else {
                base.with_style(TextStyle::new().dim())
            };
            x += buf.put_str(x, area.y, &format!(" {} ", screen.title()), area, paint) as i32 + 1;
        }

        let filter = match self.screen {
            ScreenId::Flocks => self.flocks.filter.map_or("all", FlockStatus::label),
            ScreenId::Vouchers => self.vouchers.filter.map_or("all", VoucherStatus::label),
        };
        let hint = format!("filter: {} ", filter);
        let hint_x = area.right() as i32 - hint.chars().count() as i32;
        buf.put_str(hint_x, area.y, &hint, area, base);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let paint = Paint::new(self.theme.muted, self.theme.background);
        buf.fill(area, paint);
        let text = if self.screen == ScreenId::Vouchers && self.vouchers.loading {
            format!(" Loading… {}", self.status())
        } else {
            format!(" {}", self.status())
        };
        buf.put_str(area.x as i32, area.y, &text, area, paint);
    }
}

/// Feed the viewport width, keep the cursor on the page, draw the frame.
fn draw_table<S: PageSource>(
    table: &mut TableView<S>,
    cursor: &mut usize,
    area: Rect,
    buf: &mut Buffer,
    theme: &TableTheme,
    px_per_cell: f32,
) {
    let rows = table.visible_rows().len();
    *cursor = (*cursor).min(rows.saturating_sub(1));

    let options = RenderOptions {
        px_per_cell,
        cursor: (rows > 0).then_some(*cursor),
    };
    table.handle(TableEvent::Resize {
        viewport_width: viewport_px(area, &options),
    });
    let frame = table.frame();
    render_table(&frame, area, buf, theme, &options);
}

/// Map a key to a table event for the row under the cursor.
fn table_key<S: PageSource>(
    table: &mut TableView<S>,
    cursor: &mut usize,
    key: KeyEvent,
    step: f32,
) -> bool {
    let rows = table.visible_rows().len();
    let event = match key.code {
        KeyCode::Char('h') | KeyCode::Left => TableEvent::ScrollBy(-step),
        KeyCode::Char('l') | KeyCode::Right => TableEvent::ScrollBy(step),
        KeyCode::Char('g') | KeyCode::Home => TableEvent::Navigate(NavControl::First),
        KeyCode::Char('p') | KeyCode::PageUp => TableEvent::Navigate(NavControl::Previous),
        KeyCode::Char('n') | KeyCode::PageDown => TableEvent::Navigate(NavControl::Next),
        KeyCode::Char('G') | KeyCode::End => TableEvent::Navigate(NavControl::Last),
        KeyCode::Char('j') | KeyCode::Down => {
            let to = (*cursor + 1).min(rows.saturating_sub(1));
            return move_cursor(table, cursor, to);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            let to = cursor.saturating_sub(1);
            return move_cursor(table, cursor, to);
        }
        KeyCode::Char('m') => TableEvent::ToggleMenu(*cursor),
        KeyCode::Char(c @ '1'..='9') => TableEvent::ActivateMenuItem(c as usize - '1' as usize),
        KeyCode::Esc => TableEvent::CloseMenu,
        KeyCode::Enter => TableEvent::PressRow(*cursor),
        KeyCode::Char('e') => TableEvent::Edit(*cursor),
        KeyCode::Char('d') => TableEvent::Delete(*cursor),
        _ => return false,
    };

    let changed = table.handle(event);
    if changed && matches!(event, TableEvent::Navigate(_)) {
        *cursor = 0;
    }
    changed
}

fn move_cursor<S: PageSource>(table: &mut TableView<S>, cursor: &mut usize, to: usize) -> bool {
    if *cursor == to {
        return false;
    }
    table.handle(TableEvent::CloseMenu);
    *cursor = to;
    true
}

/// Next filter in `None -> all[0] -> ... -> None` order.
fn next_filter<T: Copy + PartialEq>(current: Option<T>, all: &[T]) -> Option<T> {
    match current {
        None => all.first().copied(),
        Some(value) => {
            let pos = all.iter().position(|v| *v == value);
            pos.and_then(|i| all.get(i + 1)).copied()
        }
    }
}

/// Run the console until the user quits.
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let (pages_tx, mut pages_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, pages_tx)?;
    app.request_vouchers(1);

    let mut terminal = Terminal::new()?;
    let mut events = EventStream::new();
    log::info!("console started");

    terminal.draw(|buf| app.render(buf))?;
    while !app.should_quit() {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => app.on_terminal_event(event),
                Some(Err(e)) => log::error!("event stream error: {}", e),
                None => break,
            },
            Some(response) = pages_rx.recv() => app.on_page(response),
        }
        app.drain_actions();
        terminal.draw(|buf| app.render(buf))?;
    }

    log::info!("console stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn app() -> (App, UnboundedReceiver<PageResponse>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = AppConfig {
            api_latency_ms: 0,
            record_count: 45,
            ..AppConfig::default()
        };
        (App::new(config, tx).unwrap(), rx)
    }

    #[test]
    fn test_next_filter_cycles_through_none() {
        let all = [1, 2, 3];
        assert_eq!(next_filter(None, &all), Some(1));
        assert_eq!(next_filter(Some(1), &all), Some(2));
        assert_eq!(next_filter(Some(3), &all), None);
    }

    #[tokio::test]
    async fn test_flock_paging_keys() {
        let (mut app, _rx) = app();
        app.on_key(key('n'));
        assert_eq!(app.flocks.table.active_page(), 2);
        app.on_key(key('G'));
        assert_eq!(app.flocks.table.page_label(), "41 – 45 of 45");
        app.on_key(key('g'));
        assert_eq!(app.flocks.table.active_page(), 1);
    }

    #[tokio::test]
    async fn test_filter_resets_flock_page() {
        let (mut app, _rx) = app();
        app.on_key(key('n'));
        app.on_key(key('f'));
        assert_eq!(app.flocks.filter, Some(FlockStatus::Active));
        assert_eq!(app.flocks.table.active_page(), 1);
        assert!(app.status().contains("active"));
    }

    #[tokio::test]
    async fn test_menu_delete_removes_flock() {
        let (mut app, _rx) = app();
        app.on_key(key('j'));
        app.on_key(key('m'));
        assert_eq!(app.flocks.table.open_menu(), Some(1));

        // Menu content exists once a frame ran
        let mut buf = Buffer::new(80, 20);
        app.render(&mut buf);
        app.on_key(key('3'));

        assert_eq!(app.flocks.table.open_menu(), None);
        assert_eq!(app.flocks.table.total_records(), 44);
        assert_eq!(app.status(), "Deleted Flock 002");
    }

    #[tokio::test]
    async fn test_voucher_pages_apply_latest_only() {
        let (mut app, mut rx) = app();
        app.on_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));

        app.request_vouchers(1);
        let first = rx.recv().await.unwrap();
        app.on_page(first);
        assert_eq!(app.vouchers.table.page_label(), "1 – 10 of 45");

        // Next asks the host; the table stays on page 1 until the page arrives
        app.on_key(key('n'));
        assert_eq!(app.vouchers.table.active_page(), 1);
        app.request_vouchers(4);

        let stale = rx.recv().await.unwrap();
        let latest = rx.recv().await.unwrap();
        let (stale, latest) = if stale.request < latest.request {
            (stale, latest)
        } else {
            (latest, stale)
        };
        app.on_page(latest);
        app.on_page(stale);
        assert_eq!(app.vouchers.table.active_page(), 4);
        assert!(!app.vouchers.loading);
    }

    #[tokio::test]
    async fn test_render_draws_tabs_and_status() {
        let (mut app, _rx) = app();
        let mut buf = Buffer::new(80, 20);
        app.render(&mut buf);
        assert!(buf.row_text(0, 0, 80).contains("Flocks"));
        assert!(buf.row_text(0, 0, 80).contains("filter: all"));
        assert!(buf.row_text(19, 0, 80).contains("Tab switches screens"));
        assert!(buf.row_text(18, 0, 80).contains("1 – 10 of 45"));
    }

    #[test]
    fn test_quit_key() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(AppConfig::default(), tx).unwrap();
        app.on_key(key('q'));
        assert!(app.should_quit());
    }
}
