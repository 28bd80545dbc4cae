//! DOM mutation commands.
//!
//! The controller never touches a document. It records what should change
//! and the host applies the commands in order.

use std::fmt;

use crate::page::ElementId;

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum DomCommand {
    /// Replace an element's text content.
    SetText {
        /// Target element.
        element: ElementId,
        /// New text.
        text: String,
    },
    /// Add a class to an element.
    AddClass {
        /// Target element.
        element: ElementId,
        /// Class name.
        class: String,
    },
    /// Remove a class from an element.
    RemoveClass {
        /// Target element.
        element: ElementId,
        /// Class name.
        class: String,
    },
    /// Set an inline style property. An empty value clears it.
    SetStyle {
        /// Target element.
        element: ElementId,
        /// CSS property name (kebab-case).
        property: String,
        /// CSS value.
        value: String,
    },
    /// Scroll the window.
    ScrollTo {
        /// Target scroll offset.
        top: f32,
        /// Use smooth scrolling.
        smooth: bool,
    },
    /// Append a `<style>` element to the document head.
    InjectStylesheet {
        /// Stylesheet text.
        css: String,
    },
}

impl DomCommand {
    /// Creates a text update.
    #[must_use]
    pub fn set_text(element: ElementId, text: impl Into<String>) -> Self {
        Self::SetText {
            element,
            text: text.into(),
        }
    }

    /// Creates a class addition.
    #[must_use]
    pub fn add_class(element: ElementId, class: impl Into<String>) -> Self {
        Self::AddClass {
            element,
            class: class.into(),
        }
    }

    /// Creates a class removal.
    #[must_use]
    pub fn remove_class(element: ElementId, class: impl Into<String>) -> Self {
        Self::RemoveClass {
            element,
            class: class.into(),
        }
    }

    /// Creates an inline style update.
    #[must_use]
    pub fn set_style(element: ElementId, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetStyle {
            element,
            property: property.into(),
            value: value.into(),
        }
    }

    /// Creates an inline style removal.
    #[must_use]
    pub fn clear_style(element: ElementId, property: impl Into<String>) -> Self {
        Self::set_style(element, property, String::new())
    }

    /// Returns the element this command targets, if any.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        match self {
            Self::SetText { element, .. }
            | Self::AddClass { element, .. }
            | Self::RemoveClass { element, .. }
            | Self::SetStyle { element, .. } => Some(*element),
            Self::ScrollTo { .. } | Self::InjectStylesheet { .. } => None,
        }
    }
}

impl fmt::Display for DomCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetText { element, text } => write!(f, "{element} text {text:?}"),
            Self::AddClass { element, class } => write!(f, "{element} +.{class}"),
            Self::RemoveClass { element, class } => write!(f, "{element} -.{class}"),
            Self::SetStyle {
                element,
                property,
                value,
            } if value.is_empty() => write!(f, "{element} style {property}: <unset>"),
            Self::SetStyle {
                element,
                property,
                value,
            } => write!(f, "{element} style {property}: {value}"),
            Self::ScrollTo { top, smooth } => {
                let behavior = if *smooth { "smooth" } else { "instant" };
                write!(f, "scroll to {top} ({behavior})")
            }
            Self::InjectStylesheet { css } => write!(f, "stylesheet ({} bytes)", css.len()),
        }
    }
}

/// Collects the commands produced during one event or frame.
#[derive(Debug, Default)]
pub struct CommandBuffer {
    /// Pending commands, in emission order.
    commands: Vec<DomCommand>,
}

impl CommandBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(64),
        }
    }

    /// Clears leftovers from the previous frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
    }

    /// Adds a command.
    pub fn push(&mut self, command: DomCommand) {
        self.commands.push(command);
    }

    /// Adds multiple commands.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = DomCommand>) {
        self.commands.extend(commands);
    }

    /// Returns the pending commands.
    #[must_use]
    pub fn commands(&self) -> &[DomCommand] {
        &self.commands
    }

    /// Returns the pending command count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Removes and yields every pending command in order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, DomCommand> {
        self.commands.drain(..)
    }
}
