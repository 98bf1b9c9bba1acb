//! Draw a [`TableFrame`] into a cell [`Buffer`].
//!
//! Vertical layout inside the area, top to bottom: header line, one line per
//! body row, the horizontal scrollbar, the pagination bar. Logical pixels map
//! to terminal columns through [`RenderOptions::px_per_cell`].

use crate::buffer::{Buffer, Paint, Rect};
use crate::column::CellContent;
use crate::frame::{FrameBody, MenuOverlay, PaginationBar, ScrollbarFrame, TableFrame};
use crate::layout::ColumnSlot;
use crate::style::{Rgb, TableTheme, TextStyle, Tone};
use crate::text::{center_offset, display_width, truncate_to_width};

/// Default logical pixels per terminal column.
pub const DEFAULT_PX_PER_CELL: f32 = 10.0;

const MENU_TRIGGER: &str = "⋮";
const EDIT_ICON: &str = "✎";
const DELETE_ICON: &str = "✕";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub px_per_cell: f32,
    /// Row (page index) to highlight as the keyboard cursor.
    pub cursor: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            px_per_cell: DEFAULT_PX_PER_CELL,
            cursor: None,
        }
    }
}

impl RenderOptions {
    fn scale(&self) -> f32 {
        if self.px_per_cell.is_finite() && self.px_per_cell > 0.0 {
            self.px_per_cell
        } else {
            DEFAULT_PX_PER_CELL
        }
    }

    /// Terminal columns for a logical pixel position.
    pub fn cells(&self, px: f32) -> i32 {
        (px / self.scale()).round() as i32
    }
}

/// Logical viewport width of an area, to feed back as a resize event.
pub fn viewport_px(area: Rect, options: &RenderOptions) -> f32 {
    area.width as f32 * options.scale()
}

/// Body lines available in an area (header, scrollbar and pagination take one
/// line each).
pub fn body_lines(area: Rect) -> u16 {
    area.height.saturating_sub(3)
}

/// Render a frame into `area` of `buf`.
pub fn render_table(
    frame: &TableFrame,
    area: Rect,
    buf: &mut Buffer,
    theme: &TableTheme,
    options: &RenderOptions,
) {
    if area.is_empty() {
        return;
    }
    buf.fill(area, Paint::new(theme.text, theme.background));

    let pagination_y = area.bottom() - 1;
    render_pagination(&frame.pagination, area, pagination_y, buf, theme);
    if area.height < 3 {
        return;
    }

    let scrollbar_y = pagination_y - 1;
    render_scrollbar(&frame.scrollbar, area, scrollbar_y, buf, theme, options);

    let content = Rect::new(area.x, area.y, area.width, area.height - 2);
    match &frame.body {
        FrameBody::Empty { message } => render_empty(message, content, buf, theme),
        FrameBody::Rows(rows) => {
            let offset = frame.scrollbar.offset_x;
            render_header(&frame.slots, offset, content, buf, theme, options);

            for (line, row) in rows.iter().enumerate() {
                let y = content.y + 1 + line as u16;
                if y >= content.bottom() {
                    break;
                }
                let bg = if options.cursor == Some(row.index) {
                    theme.cursor_bg
                } else if row.index % 2 == 1 {
                    theme.row_alt_bg
                } else {
                    theme.background
                };
                buf.fill(Rect::new(content.x, y, content.width, 1), Paint::new(theme.text, bg));
                for (slot, cell) in frame.slots.iter().zip(&row.cells) {
                    render_cell(cell, slot, offset, y, content, bg, buf, theme, options);
                }
            }

            if let Some(menu) = &frame.menu {
                render_menu(menu, offset, content, buf, theme, options);
            }
        }
    }
}

/// Terminal column range `[start, end)` of a slot after scrolling.
fn slot_span(slot: &ColumnSlot, offset: f32, area: Rect, options: &RenderOptions) -> (i32, i32) {
    let start = area.x as i32 + options.cells(slot.x - offset);
    let end = area.x as i32 + options.cells(slot.right() - offset);
    (start, end)
}

fn render_header(
    slots: &[ColumnSlot],
    offset: f32,
    area: Rect,
    buf: &mut Buffer,
    theme: &TableTheme,
    options: &RenderOptions,
) {
    let paint = Paint::new(theme.text, theme.header_bg).with_style(TextStyle::new().bold());
    buf.fill(Rect::new(area.x, area.y, area.width, 1), paint);

    for slot in slots {
        let (start, end) = slot_span(slot, offset, area, options);
        let width = (end - start - 2).max(0) as usize;
        let title = truncate_to_width(slot.title(), width);
        buf.put_str(start + 1, area.y, &title, area, paint);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_cell(
    content: &CellContent,
    slot: &ColumnSlot,
    offset: f32,
    y: u16,
    area: Rect,
    bg: Rgb,
    buf: &mut Buffer,
    theme: &TableTheme,
    options: &RenderOptions,
) {
    let (start, end) = slot_span(slot, offset, area, options);
    let inner = (end - start - 2).max(0) as usize;
    let base = Paint::new(theme.text, bg);

    match content {
        CellContent::Text { text, bold } => {
            let style = if *bold { TextStyle::new().bold() } else { TextStyle::new() };
            let text = truncate_to_width(text, inner);
            buf.put_str(start + 1, y, &text, area, base.with_style(style));
        }
        CellContent::Badge { text, tone } => {
            let text = truncate_to_width(text, inner.saturating_sub(2));
            let paint = Paint::new(Rgb::new(255, 255, 255), tone.color())
                .with_style(TextStyle::new().bold());
            buf.put_str(start + 1, y, &format!(" {} ", text), area, paint);
        }
        CellContent::Link { text } => {
            let text = truncate_to_width(text, inner);
            let paint = Paint::new(theme.link, bg).with_style(TextStyle::new().underline());
            buf.put_str(start + 1, y, &text, area, paint);
        }
        CellContent::MenuTrigger { open } => {
            let paint = if *open {
                Paint::new(theme.menu_border, bg).with_style(TextStyle::new().bold())
            } else {
                Paint::new(theme.muted, bg)
            };
            let x = start + center_offset(1, (end - start).max(0) as usize) as i32;
            buf.put_str(x, y, MENU_TRIGGER, area, paint);
        }
        CellContent::Actions { edit, delete } => {
            let mut x = start + 1;
            if *edit {
                buf.put_str(x, y, EDIT_ICON, area, Paint::new(theme.link, bg));
                x += 3;
            }
            if *delete {
                buf.put_str(x, y, DELETE_ICON, area, Paint::new(Tone::Danger.color(), bg));
            }
        }
    }
}

fn render_empty(message: &str, area: Rect, buf: &mut Buffer, theme: &TableTheme) {
    if area.is_empty() {
        return;
    }
    let paint = Paint::new(theme.muted, theme.background);
    let text = truncate_to_width(message, area.width as usize);
    let x = area.x as i32 + center_offset(display_width(&text), area.width as usize) as i32;
    let y = area.y + area.height / 2;
    buf.put_str(x, y, &text, area, paint);
}

fn render_scrollbar(
    scrollbar: &ScrollbarFrame,
    area: Rect,
    y: u16,
    buf: &mut Buffer,
    theme: &TableTheme,
    options: &RenderOptions,
) {
    let track = Rect::new(area.x, y, area.width, 1);
    buf.fill(track, Paint::new(theme.text, theme.track));

    let start = options.cells(scrollbar.thumb.offset).clamp(0, area.width as i32);
    let width = options.cells(scrollbar.thumb.width).max(1);
    let end = (start + width).min(area.width as i32);
    let thumb = Rect::new(area.x + start as u16, y, (end - start).max(0) as u16, 1);
    buf.fill(thumb, Paint::new(theme.text, theme.thumb));
}

fn render_pagination(bar: &PaginationBar, area: Rect, y: u16, buf: &mut Buffer, theme: &TableTheme) {
    let enabled = Paint::new(theme.text, theme.background).with_style(TextStyle::new().bold());
    let disabled = Paint::new(theme.muted, theme.background).with_style(TextStyle::new().dim());
    let label = Paint::new(theme.text, theme.background);

    // «  ‹  label  ›  »
    let [first, prev, next, last] = bar.controls;
    let parts = [
        (first.control.symbol(), if first.enabled { enabled } else { disabled }),
        (prev.control.symbol(), if prev.enabled { enabled } else { disabled }),
        (bar.label.as_str(), label),
        (next.control.symbol(), if next.enabled { enabled } else { disabled }),
        (last.control.symbol(), if last.enabled { enabled } else { disabled }),
    ];
    let total: usize = parts.iter().map(|(text, _)| display_width(text)).sum::<usize>() + 2 * 4;

    let mut x = area.right() as i32 - total as i32 - 1;
    x = x.max(area.x as i32);
    for (i, (text, paint)) in parts.iter().enumerate() {
        if i > 0 {
            x += 2;
        }
        buf.put_str(x, y, text, area, *paint);
        x += display_width(text) as i32;
    }
}

fn render_menu(
    menu: &MenuOverlay,
    offset: f32,
    area: Rect,
    buf: &mut Buffer,
    theme: &TableTheme,
    options: &RenderOptions,
) {
    if menu.items.is_empty() {
        return;
    }

    let labels: Vec<String> = menu
        .items
        .iter()
        .enumerate()
        .map(|(i, label)| format!("{} {}", i + 1, label))
        .collect();
    let inner = labels.iter().map(|l| display_width(l)).max().unwrap_or(0);
    let width = (inner + 4) as i32;
    let height = labels.len() as i32 + 2;

    let x = (area.x as i32 + options.cells(menu.anchor_x - offset))
        .min(area.right() as i32 - width)
        .max(area.x as i32);
    let row_y = area.y as i32 + 1 + menu.row as i32;
    let y = row_y.min(area.bottom() as i32 - height).max(area.y as i32);

    let border = Paint::new(theme.menu_border, theme.menu_bg);
    let item = Paint::new(theme.text, theme.menu_bg);
    let horizontal = "─".repeat(inner + 2);

    for line in 0..height {
        let Ok(ly) = u16::try_from(y + line) else { continue };
        let text = if line == 0 {
            format!("┌{}┐", horizontal)
        } else if line == height - 1 {
            format!("└{}┘", horizontal)
        } else {
            let label = &labels[(line - 1) as usize];
            let pad = inner - display_width(label);
            format!("│ {}{} │", label, " ".repeat(pad))
        };
        let paint = if line == 0 || line == height - 1 { border } else { item };
        buf.put_str(x, ly, &text, area, paint);
        if line > 0 && line < height - 1 {
            buf.put_str(x, ly, "│", area, border);
            buf.put_str(x + width - 1, ly, "│", area, border);
        }
    }
}
