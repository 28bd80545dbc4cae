//! Tab switching for the methodology panels.

use serde::{Deserialize, Serialize};

use crate::command::{CommandBuffer, DomCommand};
use crate::page::ElementId;
use crate::style;

/// A tab button (`.tab-button`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabButton {
    /// Element id.
    pub id: ElementId,
    /// The button's `data-tab` attribute: anchor of the panel it opens.
    pub target: String,
}

/// A tab panel (`.tab-content`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabContent {
    /// Element id.
    pub id: ElementId,
    /// The panel's `id` attribute.
    pub anchor: String,
}

/// Activates `button`, deactivating every other button and panel.
///
/// The panel is only activated if one with a matching anchor exists.
/// Returns the activated panel, if any.
pub fn activate(
    button: &TabButton,
    buttons: &[TabButton],
    contents: &[TabContent],
    out: &mut CommandBuffer,
) -> Option<ElementId> {
    for other in buttons {
        out.push(DomCommand::remove_class(other.id, style::ACTIVE));
    }
    for content in contents {
        out.push(DomCommand::remove_class(content.id, style::ACTIVE));
    }

    out.push(DomCommand::add_class(button.id, style::ACTIVE));

    let panel = contents.iter().find(|c| c.anchor == button.target)?;
    out.push(DomCommand::add_class(panel.id, style::ACTIVE));
    tracing::debug!(tab = %button.target, "tab switched");
    Some(panel.id)
}
