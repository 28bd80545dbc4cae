//! Page input events.
//!
//! Hosts translate DOM events into [`PageEvent`]s; the controller answers
//! with an [`EventOutcome`] telling the host whether to suppress the
//! browser's default action.

use crate::navigation::Step;
use crate::page::ElementId;
use crate::subscription::EventSource;

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Any key the page does not react to.
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom(key: &str) -> Self {
        match key {
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            _ => Self::Other,
        }
    }

    /// Section step this key requests, if any.
    #[must_use]
    pub const fn step(self) -> Option<Step> {
        match self {
            Self::ArrowUp => Some(Step::Previous),
            Self::ArrowDown => Some(Step::Next),
            Self::Other => None,
        }
    }
}

/// An event delivered to the page controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    /// The document is parsed (`DOMContentLoaded`).
    Ready,
    /// All resources finished loading.
    Load,
    /// The window scrolled.
    Scroll {
        /// New vertical offset.
        scroll_y: f32,
    },
    /// The window was resized.
    Resize {
        /// New viewport width.
        width: f32,
        /// New viewport height.
        height: f32,
    },
    /// A key was pressed.
    KeyDown(Key),
    /// A touch began.
    TouchStart {
        /// Screen Y of the first changed touch.
        screen_y: f32,
    },
    /// A touch ended.
    TouchEnd {
        /// Screen Y of the first changed touch.
        screen_y: f32,
    },
    /// An element was clicked.
    Click(ElementId),
    /// The pointer entered an element.
    PointerEnter(ElementId),
    /// The pointer left an element.
    PointerLeave(ElementId),
}

impl PageEvent {
    /// Subscription that must be live for this event to be handled.
    ///
    /// `Ready` is always handled.
    #[must_use]
    pub fn source(&self) -> Option<EventSource> {
        match self {
            Self::Ready => None,
            Self::Load => Some(EventSource::Load),
            Self::Scroll { .. } => Some(EventSource::Scroll),
            Self::Resize { .. } => Some(EventSource::Resize),
            Self::KeyDown(_) => Some(EventSource::KeyDown),
            Self::TouchStart { .. } => Some(EventSource::TouchStart),
            Self::TouchEnd { .. } => Some(EventSource::TouchEnd),
            Self::Click(_) => Some(EventSource::Click),
            Self::PointerEnter(_) | Self::PointerLeave(_) => Some(EventSource::Pointer),
        }
    }

    /// True if handling this event reads element positions.
    ///
    /// Hosts re-measure geometry before dispatching these, since tab
    /// switches and late-loading content move sections without a resize.
    #[must_use]
    pub const fn reads_layout(&self) -> bool {
        !matches!(
            self,
            Self::TouchStart { .. } | Self::PointerEnter(_) | Self::PointerLeave(_)
        )
    }
}

/// What the host should do with the originating DOM event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the DOM event.
    pub prevent_default: bool,
}

impl EventOutcome {
    /// Let the browser handle the event normally.
    pub const PASS: Self = Self {
        prevent_default: false,
    };
    /// Suppress the browser's default action.
    pub const PREVENT: Self = Self {
        prevent_default: true,
    };
}

/// Turns a touchstart/touchend pair into a section step.
#[derive(Debug, Clone, Copy)]
pub struct SwipeTracker {
    /// Screen Y at the last touchstart.
    start_y: f32,
    /// Minimum vertical travel (pixels).
    threshold: f32,
}

impl SwipeTracker {
    /// Creates a tracker with the given travel threshold.
    #[must_use]
    pub const fn new(threshold: f32) -> Self {
        Self {
            start_y: 0.0,
            threshold,
        }
    }

    /// Records a touchstart.
    pub fn touch_start(&mut self, screen_y: f32) {
        self.start_y = screen_y;
    }

    /// Records a touchend and classifies the swipe.
    ///
    /// Dragging down moves to the previous section; dragging up moves to the next.
    #[must_use]
    pub fn touch_end(&self, screen_y: f32) -> Option<Step> {
        if screen_y > self.start_y + self.threshold {
            Some(Step::Previous)
        } else if self.start_y > screen_y + self.threshold {
            Some(Step::Next)
        } else {
            None
        }
    }
}
