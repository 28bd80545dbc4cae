//! Section navigation: scroll-spy highlighting, link clicks, keyboard and
//! swipe stepping.

use serde::{Deserialize, Serialize};

use crate::command::{CommandBuffer, DomCommand};
use crate::layout::{Rect, Viewport};
use crate::page::ElementId;
use crate::style;

/// A content section (`.section`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Element id.
    pub id: ElementId,
    /// The section's `id` attribute, used as link anchor.
    pub anchor: String,
    /// Document-space bounds (`offsetTop` / `clientHeight`).
    pub rect: Rect,
}

/// A navigation link (`.nav-link`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    /// Element id.
    pub id: ElementId,
    /// The link's `href`, e.g. `"#overview"`.
    pub href: String,
}

impl NavLink {
    /// Returns the anchor the link points at (href without its first character).
    #[must_use]
    pub fn target(&self) -> &str {
        let mut chars = self.href.chars();
        chars.next();
        chars.as_str()
    }
}

/// Direction of a one-section step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Towards the top of the page.
    Previous,
    /// Towards the bottom of the page.
    Next,
}

/// Returns the anchor of the section the reader is in.
///
/// That is the last section whose top, less a third of its height, has
/// been scrolled past.
#[must_use]
pub fn active_section(sections: &[Section], scroll_y: f32) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| scroll_y >= s.rect.y - s.rect.height / 3.0)
        .map(|s| s.anchor.as_str())
}

/// Returns the index of the section crossing the focus line.
///
/// The focus line sits `focus_line` pixels below the top of the viewport.
#[must_use]
pub fn current_section(sections: &[Section], viewport: &Viewport, focus_line: f32) -> Option<usize> {
    sections.iter().position(|s| {
        let client = viewport.to_client(s.rect);
        client.y <= focus_line && client.bottom() >= focus_line
    })
}

/// Returns the index one step away from `current`, if it is in bounds.
#[must_use]
pub fn step_from(current: usize, step: Step, len: usize) -> Option<usize> {
    match step {
        Step::Previous if current > 0 => Some(current - 1),
        Step::Next if current + 1 < len => Some(current + 1),
        _ => None,
    }
}

/// Scroll position that brings `section` just below the fixed navbar.
#[must_use]
pub fn scroll_target(section: &Section, nav_offset: f32) -> f32 {
    section.rect.y - nav_offset
}

/// Keeps the `active` class on the nav link of the current section.
#[derive(Debug, Clone, Default)]
pub struct NavHighlighter {
    /// Anchor highlighted by the last pass. `None` before the first pass.
    highlighted: Option<Option<String>>,
}

impl NavHighlighter {
    /// Creates a highlighter that has not run yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the anchor currently highlighted.
    #[must_use]
    pub fn highlighted(&self) -> Option<&str> {
        self.highlighted.as_ref().and_then(|h| h.as_deref())
    }

    /// Recomputes the active section and emits class changes.
    ///
    /// The first pass resets every link; later passes only touch links whose
    /// state changed. Returns true if anything was emitted.
    pub fn update(
        &mut self,
        sections: &[Section],
        links: &[NavLink],
        scroll_y: f32,
        out: &mut CommandBuffer,
    ) -> bool {
        let current = active_section(sections, scroll_y).map(str::to_owned);

        if let Some(previous) = &self.highlighted {
            if *previous == current {
                return false;
            }
        }

        let first_pass = self.highlighted.is_none();
        let previous = self.highlighted.take().flatten();

        for link in links {
            let target = link.target();
            let was_active = previous.as_deref() == Some(target);
            let is_active = current.as_deref() == Some(target);

            if is_active && (first_pass || !was_active) {
                out.push(DomCommand::add_class(link.id, style::ACTIVE));
            } else if !is_active && (first_pass || was_active) {
                out.push(DomCommand::remove_class(link.id, style::ACTIVE));
            }
        }

        tracing::trace!(section = current.as_deref().unwrap_or(""), "nav highlight");
        self.highlighted = Some(current);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<Section> {
        ["intro", "method", "results"]
            .iter()
            .enumerate()
            .map(|(i, anchor)| Section {
                id: ElementId(i as u32),
                anchor: (*anchor).to_string(),
                rect: Rect::new(0.0, i as f32 * 900.0, 1280.0, 900.0),
            })
            .collect()
    }

    fn links() -> Vec<NavLink> {
        ["#intro", "#method", "#results"]
            .iter()
            .enumerate()
            .map(|(i, href)| NavLink {
                id: ElementId(100 + i as u32),
                href: (*href).to_string(),
            })
            .collect()
    }

    #[test]
    fn test_active_section_uses_third_of_height() {
        let sections = sections();

        assert_eq!(active_section(&sections, 0.0), Some("intro"));
        // method starts at 900, activates at 900 - 300
        assert_eq!(active_section(&sections, 599.0), Some("intro"));
        assert_eq!(active_section(&sections, 600.0), Some("method"));
        assert_eq!(active_section(&sections, 5000.0), Some("results"));
    }

    #[test]
    fn test_no_active_section_above_first() {
        let mut sections = sections();
        sections[0].rect.y = 900.0;
        assert_eq!(active_section(&sections[..1], 0.0), None);
    }

    #[test]
    fn test_current_section_focus_line() {
        let sections = sections();
        let mut viewport = Viewport::new(1280.0, 800.0);

        assert_eq!(current_section(&sections, &viewport, 100.0), Some(0));
        viewport.scroll_y = 850.0;
        assert_eq!(current_section(&sections, &viewport, 100.0), Some(1));
        viewport.scroll_y = -500.0;
        assert_eq!(current_section(&sections, &viewport, 100.0), None);
    }

    #[test]
    fn test_step_bounds() {
        assert_eq!(step_from(0, Step::Previous, 3), None);
        assert_eq!(step_from(0, Step::Next, 3), Some(1));
        assert_eq!(step_from(2, Step::Next, 3), None);
        assert_eq!(step_from(2, Step::Previous, 3), Some(1));
    }

    #[test]
    fn test_link_target_strips_hash() {
        let link = NavLink {
            id: ElementId(1),
            href: "#results".to_string(),
        };
        assert_eq!(link.target(), "results");
    }

    #[test]
    fn test_highlighter_resets_then_diffs() {
        let sections = sections();
        let links = links();
        let mut nav = NavHighlighter::new();
        let mut out = CommandBuffer::new();

        assert!(nav.update(&sections, &links, 0.0, &mut out));
        assert_eq!(
            out.drain().collect::<Vec<_>>(),
            vec![
                DomCommand::add_class(ElementId(100), style::ACTIVE),
                DomCommand::remove_class(ElementId(101), style::ACTIVE),
                DomCommand::remove_class(ElementId(102), style::ACTIVE),
            ]
        );

        assert!(!nav.update(&sections, &links, 10.0, &mut out));
        assert!(out.is_empty());

        assert!(nav.update(&sections, &links, 700.0, &mut out));
        assert_eq!(
            out.drain().collect::<Vec<_>>(),
            vec![
                DomCommand::remove_class(ElementId(100), style::ACTIVE),
                DomCommand::add_class(ElementId(101), style::ACTIVE),
            ]
        );
        assert_eq!(nav.highlighted(), Some("method"));
    }
}
