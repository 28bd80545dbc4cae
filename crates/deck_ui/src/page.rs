//! Page model: the elements the controller drives.
//!
//! The host scans its document once and describes it here. Every element
//! is identified by an [`ElementId`] the host can map back to a node.

use serde::{Deserialize, Serialize};

use deck_core::{DeckError, DeckResult};

use crate::hover::HoverTarget;
use crate::layout::Rect;
use crate::navigation::{NavLink, Section};
use crate::reveal::{FeatureBar, RevealTarget};
use crate::tabs::{TabButton, TabContent};

/// Unique identifier for a page element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u32);

impl ElementId {
    /// The document body.
    pub const BODY: Self = Self(u32::MAX);

    /// Creates a new element ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if *self == Self::BODY {
            return f.write_str("body");
        }
        write!(f, "#{}", self.0)
    }
}

/// A metric value display (`.metric-value`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDisplay {
    /// Element id.
    pub id: ElementId,
    /// Displayed text at page load.
    pub text: String,
}

/// Everything the controller knows about the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageModel {
    /// Content sections (`.section`), in document order.
    pub sections: Vec<Section>,
    /// Navigation links (`.nav-link`).
    pub nav_links: Vec<NavLink>,
    /// Tab buttons (`.tab-button`).
    pub tab_buttons: Vec<TabButton>,
    /// Tab panels (`.tab-content`).
    pub tab_contents: Vec<TabContent>,
    /// Cards revealed on scroll.
    pub reveal_targets: Vec<RevealTarget>,
    /// Feature importance bars (`.feature-bar`).
    pub feature_bars: Vec<FeatureBar>,
    /// Metric value displays (`.metric-value`).
    pub metrics: Vec<MetricDisplay>,
    /// Metric cards (`.metric`) that get a staggered count-up class.
    pub metric_cards: Vec<ElementId>,
    /// Elements with hover styling.
    pub hover_targets: Vec<HoverTarget>,
}

impl PageModel {
    /// Parses a page model from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid page description.
    pub fn from_toml_str(text: &str) -> DeckResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a page model from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<std::path::Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DeckError::io(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Returns the geometry slot of a tracked element, if it has one.
    pub(crate) fn rect_mut(&mut self, id: ElementId) -> Option<&mut Rect> {
        if let Some(section) = self.sections.iter_mut().find(|s| s.id == id) {
            return Some(&mut section.rect);
        }
        if let Some(target) = self.reveal_targets.iter_mut().find(|t| t.id == id) {
            return Some(&mut target.rect);
        }
        self.feature_bars
            .iter_mut()
            .find(|b| b.id == id)
            .map(|b| &mut b.rect)
    }

    /// Returns the section with the given anchor.
    #[must_use]
    pub fn section_by_anchor(&self, anchor: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.anchor == anchor)
    }
}
