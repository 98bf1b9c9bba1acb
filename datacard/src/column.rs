//! Column definitions and cell renderers.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::row::{display_value, Row};
use crate::style::Tone;

// =============================================================================
// CellContent
// =============================================================================

/// What a cell displays after its renderer ran.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Plain text, bold for title columns.
    Text { text: String, bold: bool },
    /// Short status label on a colored background.
    Badge { text: String, tone: Tone },
    /// Underlined, link-colored text.
    Link { text: String },
    /// The per-row overflow menu trigger.
    MenuTrigger { open: bool },
    /// Trailing edit/delete icons.
    Actions { edit: bool, delete: bool },
}

impl CellContent {
    pub fn text(text: impl Into<String>) -> Self {
        CellContent::Text {
            text: text.into(),
            bold: false,
        }
    }

    /// The text this cell shows, if it shows text.
    pub fn label(&self) -> Option<&str> {
        match self {
            CellContent::Text { text, .. }
            | CellContent::Badge { text, .. }
            | CellContent::Link { text } => Some(text),
            CellContent::MenuTrigger { .. } | CellContent::Actions { .. } => None,
        }
    }
}

// =============================================================================
// CellRenderer
// =============================================================================

/// Maps badge text to a tone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeStyle {
    /// Tone for values not listed in `tones`.
    pub fallback: Tone,
    /// Case-insensitive value to tone pairs.
    pub tones: Vec<(String, Tone)>,
}

impl BadgeStyle {
    pub fn new(fallback: Tone) -> Self {
        Self {
            fallback,
            tones: Vec::new(),
        }
    }

    pub fn tone(mut self, value: impl Into<String>, tone: Tone) -> Self {
        self.tones.push((value.into(), tone));
        self
    }

    pub fn resolve(&self, text: &str) -> Tone {
        self.tones
            .iter()
            .find(|(value, _)| value.eq_ignore_ascii_case(text))
            .map(|(_, tone)| *tone)
            .unwrap_or(self.fallback)
    }
}

/// Custom render function: receives the cell value (if any) and the whole row.
pub type CustomRender = Arc<dyn Fn(Option<&Value>, &Row) -> CellContent + Send + Sync>;

/// How a column turns a row value into cell content.
#[derive(Clone, Default)]
pub enum CellRenderer {
    /// Value text, placeholder when missing.
    #[default]
    Default,
    Badge(BadgeStyle),
    Link,
    Custom(CustomRender),
}

impl fmt::Debug for CellRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellRenderer::Default => f.write_str("Default"),
            CellRenderer::Badge(style) => f.debug_tuple("Badge").field(style).finish(),
            CellRenderer::Link => f.write_str("Link"),
            CellRenderer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl CellRenderer {
    pub fn custom<F>(render: F) -> Self
    where
        F: Fn(Option<&Value>, &Row) -> CellContent + Send + Sync + 'static,
    {
        CellRenderer::Custom(Arc::new(render))
    }

    /// Render one cell. `bold` applies to the default text renderer only.
    pub fn render(&self, value: Option<&Value>, row: &Row, bold: bool) -> CellContent {
        match self {
            CellRenderer::Default => CellContent::Text {
                text: display_value(value),
                bold,
            },
            CellRenderer::Badge(style) => {
                let text = display_value(value);
                let tone = style.resolve(&text);
                CellContent::Badge { text, tone }
            }
            CellRenderer::Link => CellContent::Link {
                text: display_value(value),
            },
            CellRenderer::Custom(render) => render(value, row),
        }
    }
}

// =============================================================================
// ColumnSpec
// =============================================================================

/// Callback fired when a column's menu trigger is pressed.
pub type DotsCallback = Arc<dyn Fn(&Row) + Send + Sync>;

/// A table column definition.
#[derive(Clone)]
pub struct ColumnSpec {
    /// Row field this column reads.
    pub key: String,
    /// Header text.
    pub title: String,
    /// Fixed width in logical pixels; `None` uses the configured default.
    pub width: Option<f32>,
    pub renderer: CellRenderer,
    /// Primary identifier column, rendered bold.
    pub is_title: bool,
    /// Reserve the leading row-menu trigger column for the whole table.
    pub show_dots: bool,
    pub on_dots_press: Option<DotsCallback>,
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("width", &self.width)
            .field("renderer", &self.renderer)
            .field("is_title", &self.is_title)
            .field("show_dots", &self.show_dots)
            .field("on_dots_press", &self.on_dots_press.is_some())
            .finish()
    }
}

impl ColumnSpec {
    /// Create a column reading `key` with header `title`.
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            width: None,
            renderer: CellRenderer::Default,
            is_title: false,
            show_dots: false,
            on_dots_press: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn title_column(mut self) -> Self {
        self.is_title = true;
        self
    }

    pub fn renderer(mut self, renderer: CellRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn badge(self, style: BadgeStyle) -> Self {
        self.renderer(CellRenderer::Badge(style))
    }

    pub fn link(self) -> Self {
        self.renderer(CellRenderer::Link)
    }

    pub fn custom<F>(self, render: F) -> Self
    where
        F: Fn(Option<&Value>, &Row) -> CellContent + Send + Sync + 'static,
    {
        self.renderer(CellRenderer::custom(render))
    }

    pub fn show_dots(mut self) -> Self {
        self.show_dots = true;
        self
    }

    /// Show the row-menu trigger and call `f` with the row on every trigger
    /// press, opening or closing. With several such columns, all of their
    /// callbacks fire on one press, in column order.
    pub fn on_dots_press<F>(mut self, f: F) -> Self
    where
        F: Fn(&Row) + Send + Sync + 'static,
    {
        self.show_dots = true;
        self.on_dots_press = Some(Arc::new(f));
        self
    }

    /// Width in logical pixels, falling back to `default`.
    pub fn effective_width(&self, default: f32) -> f32 {
        match self.width {
            Some(w) if w.is_finite() && w > 0.0 => w,
            _ => default,
        }
    }

    /// Render this column's cell for a row.
    pub fn render_cell(&self, row: &Row) -> CellContent {
        self.renderer.render(row.get(&self.key), row, self.is_title)
    }
}
