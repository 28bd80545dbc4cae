//! Scroll-triggered reveal.
//!
//! Cards fade in once a tenth of them is inside the viewport (minus a bottom
//! margin); feature bars fill to their width once half visible. Both are
//! one-shot: scrolling away never hides them again.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::command::{CommandBuffer, DomCommand};
use crate::layout::{Rect, Viewport};
use crate::page::ElementId;
use crate::style;

/// A card that slides in when it scrolls into view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealTarget {
    /// Element id.
    pub id: ElementId,
    /// Document-space bounds.
    pub rect: Rect,
}

/// A feature importance bar (`.feature-bar`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBar {
    /// Bar element id (observed for visibility).
    pub id: ElementId,
    /// The inner `.feature-value` element whose width is set.
    pub value: ElementId,
    /// Inline `style` attribute of the value element, e.g. `"width: 85%"`.
    pub style: String,
    /// Document-space bounds of the bar.
    pub rect: Rect,
}

impl FeatureBar {
    /// Returns the width declared in the inline style, if any.
    #[must_use]
    pub fn width(&self) -> Option<&str> {
        bar_width(&self.style)
    }
}

/// Extracts the value after the first `:` of an inline style declaration.
#[must_use]
pub fn bar_width(style: &str) -> Option<&str> {
    let value = style.split(':').nth(1)?;
    let value = value.trim().trim_end_matches(';').trim();
    (!value.is_empty()).then_some(value)
}

/// Fraction of `target`'s height inside the viewport.
///
/// The viewport's bottom edge is pulled up by `bottom_margin`. Zero-height
/// targets count as fully visible when their top edge is inside.
#[must_use]
pub fn intersection_ratio(target: Rect, viewport: &Viewport, bottom_margin: f32) -> f32 {
    let root = viewport.visible_rect().extend_bottom(-bottom_margin);

    if target.height <= 0.0 {
        let inside = target.y >= root.y && target.y <= root.bottom();
        return if inside { 1.0 } else { 0.0 };
    }

    let top = target.y.max(root.y);
    let bottom = target.bottom().min(root.bottom());
    ((bottom - top) / target.height).clamp(0.0, 1.0)
}

/// One-shot visibility tracker.
#[derive(Debug, Clone)]
pub struct RevealObserver {
    /// Minimum visible fraction.
    threshold: f32,
    /// Pixels trimmed off the viewport bottom.
    bottom_margin: f32,
    /// Elements already revealed.
    revealed: HashSet<ElementId>,
}

impl RevealObserver {
    /// Creates an observer.
    #[must_use]
    pub fn new(threshold: f32, bottom_margin: f32) -> Self {
        Self {
            threshold,
            bottom_margin,
            revealed: HashSet::new(),
        }
    }

    /// Marks `id` revealed if it just became visible enough.
    fn check(&mut self, id: ElementId, rect: Rect, viewport: &Viewport) -> bool {
        if self.revealed.contains(&id) {
            return false;
        }
        let ratio = intersection_ratio(rect, viewport, self.bottom_margin);
        if ratio > 0.0 && ratio >= self.threshold {
            self.revealed.insert(id);
            return true;
        }
        false
    }

    /// Adds `animate-in` to cards that just came into view.
    pub fn observe_cards(&mut self, targets: &[RevealTarget], viewport: &Viewport, out: &mut CommandBuffer) {
        for target in targets {
            if self.check(target.id, target.rect, viewport) {
                out.push(DomCommand::add_class(target.id, style::ANIMATE_IN));
            }
        }
    }

    /// Sets the width of bars that just came into view.
    pub fn observe_bars(&mut self, bars: &[FeatureBar], viewport: &Viewport, out: &mut CommandBuffer) {
        for bar in bars {
            if !self.check(bar.id, bar.rect, viewport) {
                continue;
            }
            match bar.width() {
                Some(width) => out.push(DomCommand::set_style(bar.value, "width", width)),
                None => tracing::debug!(bar = %bar.id, "feature bar has no width"),
            }
        }
    }
}
