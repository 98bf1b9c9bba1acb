//! Colors and text attributes for rendered cells.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert an OKLCH color (lightness 0..1, chroma, hue in degrees).
    pub fn from_oklch(l: f32, c: f32, h: f32) -> Self {
        use palette::{IntoColor, Oklch, Srgb};

        let oklch = Oklch::new(l, c, h);
        let srgb: Srgb = oklch.into_color();
        let (r, g, b) = srgb.into_format::<u8>().into_components();

        Self::new(r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub dim: bool,
    pub underline: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            dim: false,
            underline: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// Semantic color of a badge cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
}

impl Tone {
    /// Badge background. Shared lightness and chroma keep tones equally loud.
    pub fn color(self) -> Rgb {
        match self {
            Tone::Neutral => Rgb::from_oklch(0.45, 0.02, 260.0),
            Tone::Success => Rgb::from_oklch(0.55, 0.14, 150.0),
            Tone::Warning => Rgb::from_oklch(0.55, 0.14, 80.0),
            Tone::Danger => Rgb::from_oklch(0.55, 0.14, 25.0),
            Tone::Info => Rgb::from_oklch(0.55, 0.14, 240.0),
        }
    }
}

/// Colors used by the terminal renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct TableTheme {
    pub background: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub header_bg: Rgb,
    pub row_alt_bg: Rgb,
    pub cursor_bg: Rgb,
    pub link: Rgb,
    pub track: Rgb,
    pub thumb: Rgb,
    pub menu_bg: Rgb,
    pub menu_border: Rgb,
}

impl Default for TableTheme {
    fn default() -> Self {
        Self {
            background: Rgb::new(26, 26, 46),
            text: Rgb::new(232, 232, 232),
            muted: Rgb::new(127, 140, 141),
            header_bg: Rgb::new(40, 40, 70),
            row_alt_bg: Rgb::new(32, 32, 56),
            cursor_bg: Rgb::from_oklch(0.40, 0.08, 170.0),
            link: Rgb::new(100, 150, 255),
            track: Rgb::new(60, 60, 70),
            thumb: Rgb::new(120, 120, 140),
            menu_bg: Rgb::new(48, 48, 80),
            menu_border: Rgb::new(78, 204, 163),
        }
    }
}
