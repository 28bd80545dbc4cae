//! Pointer hover styling.

use serde::{Deserialize, Serialize};

use crate::command::DomCommand;
use crate::config::HoverConfig;
use crate::page::ElementId;

/// Hover treatment for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverEffect {
    /// Glowing box shadow (phase circles).
    Glow,
    /// Tinted background (performance table rows).
    Highlight,
}

impl HoverEffect {
    /// CSS property this effect drives.
    #[must_use]
    pub const fn property(self) -> &'static str {
        match self {
            Self::Glow => "box-shadow",
            Self::Highlight => "background-color",
        }
    }

    /// Value applied while hovered.
    #[must_use]
    pub fn value(self, config: &HoverConfig) -> &str {
        match self {
            Self::Glow => &config.glow,
            Self::Highlight => &config.highlight,
        }
    }

    /// Command for the pointer entering the element.
    #[must_use]
    pub fn enter(self, element: ElementId, config: &HoverConfig) -> DomCommand {
        DomCommand::set_style(element, self.property(), self.value(config))
    }

    /// Command for the pointer leaving the element.
    #[must_use]
    pub fn leave(self, element: ElementId) -> DomCommand {
        DomCommand::clear_style(element, self.property())
    }
}

/// An element with hover styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoverTarget {
    /// Element id.
    pub id: ElementId,
    /// Treatment applied on hover.
    pub effect: HoverEffect,
}
