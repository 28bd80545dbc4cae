//! Page geometry.
//!
//! All rects are in document coordinates (CSS pixels, y grows downward).
//! The [`Viewport`] maps them into the visible window.

use serde::{Deserialize, Serialize};

/// A rectangle in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position (left edge).
    #[serde(default)]
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    #[serde(default)]
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Moves the rectangle vertically.
    #[must_use]
    pub fn offset_y(&self, dy: f32) -> Self {
        Self::new(self.x, self.y + dy, self.width, self.height)
    }

    /// Grows (positive) or shrinks (negative) the bottom edge.
    #[must_use]
    pub fn extend_bottom(&self, amount: f32) -> Self {
        Self::new(self.x, self.y, self.width, (self.height + amount).max(0.0))
    }
}

/// The visible window onto the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset (`pageYOffset`).
    #[serde(default)]
    pub scroll_y: f32,
    /// Viewport width.
    pub width: f32,
    /// Viewport height.
    pub height: f32,
}

impl Viewport {
    /// Creates a viewport scrolled to the top.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    /// Returns the visible area in document coordinates.
    #[must_use]
    pub fn visible_rect(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }

    /// Converts a document rect into viewport coordinates (`getBoundingClientRect`).
    #[must_use]
    pub fn to_client(&self, rect: Rect) -> Rect {
        rect.offset_y(-self.scroll_y)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}
