//! Cell buffer the table renders into.

use crate::style::{Rgb, TextStyle};
use crate::text::char_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    /// Second column of a wide character; the terminal skips it.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

/// Foreground, background and attributes applied to written text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
}

impl Paint {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            style: TextStyle::new(),
        }
    }

    pub const fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Paint every cell of `area` with a blank in `paint`.
    pub fn fill(&mut self, area: Rect, paint: Paint) {
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell {
                        char: ' ',
                        fg: paint.fg,
                        bg: paint.bg,
                        style: paint.style,
                        wide_continuation: false,
                    };
                }
            }
        }
    }

    /// Write `text` starting at column `x` (may be negative or past the
    /// clip), keeping only the part inside `clip`. Returns columns written.
    pub fn put_str(&mut self, x: i32, y: u16, text: &str, clip: Rect, paint: Paint) -> u16 {
        if y < clip.y || y >= clip.bottom() {
            return 0;
        }
        let mut col = x;
        let mut written = 0;
        for ch in text.chars() {
            let w = char_width(ch) as i32;
            if w == 0 {
                continue;
            }
            let fits = col >= clip.x as i32 && col + w <= clip.right() as i32;
            if fits {
                let cx = col as u16;
                if let Some(cell) = self.get_mut(cx, y) {
                    *cell = Cell {
                        char: ch,
                        fg: paint.fg,
                        bg: paint.bg,
                        style: paint.style,
                        wide_continuation: false,
                    };
                    written += 1;
                }
                if w == 2
                    && let Some(cell) = self.get_mut(cx + 1, y)
                {
                    *cell = Cell {
                        char: ' ',
                        fg: paint.fg,
                        bg: paint.bg,
                        style: paint.style,
                        wide_continuation: true,
                    };
                    written += 1;
                }
            }
            col += w;
            if col >= clip.right() as i32 {
                break;
            }
        }
        written
    }

    /// Text of row `y` between columns `x0..x1`, wide continuations skipped.
    pub fn row_text(&self, y: u16, x0: u16, x1: u16) -> String {
        (x0..x1.min(self.width))
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}
