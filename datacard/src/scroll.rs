//! Horizontal scroll state and scrollbar thumb geometry.
//!
//! Offsets and widths are logical pixels. The thumb is derived from the
//! current offset, content width and viewport width every time it is asked
//! for, so a size change and a scroll report can never be combined stale.

use crate::config::MIN_THUMB_WIDTH;

/// Position and size of the scrollbar thumb within its track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollThumb {
    pub width: f32,
    pub offset: f32,
}

/// Horizontal scroll metrics for a table body.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollMetrics {
    offset_x: f32,
    content_width: f32,
    viewport_width: f32,
    min_thumb_width: f32,
}

impl Default for ScrollMetrics {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            content_width: 0.0,
            viewport_width: 0.0,
            min_thumb_width: MIN_THUMB_WIDTH,
        }
    }
}

impl ScrollMetrics {
    pub fn new(content_width: f32, viewport_width: f32) -> Self {
        Self {
            content_width: sanitize(content_width),
            viewport_width: sanitize(viewport_width),
            ..Default::default()
        }
    }

    pub fn with_min_thumb_width(mut self, width: f32) -> Self {
        self.set_min_thumb_width(width);
        self
    }

    pub fn offset_x(&self) -> f32 {
        self.offset_x
    }

    pub fn content_width(&self) -> f32 {
        self.content_width
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn min_thumb_width(&self) -> f32 {
        self.min_thumb_width
    }

    /// Largest valid offset (content minus viewport, never negative).
    pub fn max_offset(&self) -> f32 {
        (self.content_width - self.viewport_width).max(0.0)
    }

    /// Whether content overflows the viewport.
    pub fn can_scroll(&self) -> bool {
        self.content_width > self.viewport_width
    }

    /// Record a scroll position report. Returns true if the offset moved.
    pub fn set_offset(&mut self, offset: f32) -> bool {
        let old = self.offset_x;
        self.offset_x = sanitize(offset).min(self.max_offset());
        log::trace!("scroll offset {} -> {}", old, self.offset_x);
        self.offset_x != old
    }

    /// Scroll by a relative amount.
    pub fn scroll_by(&mut self, delta: f32) -> bool {
        self.set_offset(self.offset_x + delta)
    }

    /// Content width changed (columns added, removed or resized).
    pub fn set_content_width(&mut self, width: f32) {
        self.content_width = sanitize(width);
        // Clamp offset if content shrunk
        self.offset_x = self.offset_x.min(self.max_offset());
    }

    /// Viewport width changed (layout measurement).
    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = sanitize(width);
        // Clamp offset if viewport grew
        self.offset_x = self.offset_x.min(self.max_offset());
    }

    pub fn set_min_thumb_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.min_thumb_width = width;
        }
    }

    /// Current thumb geometry.
    pub fn thumb(&self) -> ScrollThumb {
        thumb_geometry(
            self.offset_x,
            self.content_width,
            self.viewport_width,
            self.min_thumb_width,
        )
    }
}

/// Thumb width and offset for a horizontal track as wide as the viewport.
///
/// Without overflow the thumb spans the whole track at offset 0. Any
/// non-finite intermediate result becomes 0.
pub fn thumb_geometry(
    offset: f32,
    content_width: f32,
    viewport_width: f32,
    min_thumb_width: f32,
) -> ScrollThumb {
    let viewport = finite_or_zero(viewport_width).max(0.0);
    let content = finite_or_zero(content_width).max(0.0);

    if content <= viewport {
        return ScrollThumb {
            width: viewport,
            offset: 0.0,
        };
    }

    let width = finite_or_zero((viewport / content) * viewport)
        .max(min_thumb_width)
        .min(viewport);
    let offset = finite_or_zero((offset / (content - viewport)) * (viewport - width))
        .clamp(0.0, (viewport - width).max(0.0));

    ScrollThumb { width, offset }
}

fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

fn sanitize(value: f32) -> f32 {
    finite_or_zero(value).max(0.0)
}
