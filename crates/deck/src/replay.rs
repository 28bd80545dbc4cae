//! Headless scripted sessions.
//!
//! A [`Script`] lists timestamped page events. [`Replay`] feeds them to a
//! [`PageController`], simulating display refreshes between them, and
//! records every command the controller emits.
//!
//! ```toml
//! frame_interval_ms = 16.0
//!
//! [[steps]]
//! at_ms = 0.0
//! event = { kind = "ready" }
//!
//! [[steps]]
//! at_ms = 500.0
//! event = { kind = "scroll", scroll_y = 1200.0 }
//! ```

use std::path::Path;

use serde::Deserialize;

use deck_core::{DeckError, DeckResult};
use deck_ui::{CommandBuffer, DomCommand, ElementId, Key, PageController, PageEvent};

/// Upper bound on simulated time after the last step (milliseconds).
const MAX_SETTLE_MS: f64 = 60_000.0;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptedEvent {
    /// Document parsed.
    Ready,
    /// Resources loaded.
    Load,
    /// Window scrolled.
    Scroll {
        /// New vertical offset.
        scroll_y: f32,
    },
    /// Window resized.
    Resize {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// Key pressed, named as DOM `KeyboardEvent.key`.
    Key {
        /// Key name, e.g. `"ArrowDown"`.
        key: String,
    },
    /// Touch from one screen Y to another.
    Swipe {
        /// Screen Y at touchstart.
        from_y: f32,
        /// Screen Y at touchend.
        to_y: f32,
    },
    /// Element clicked.
    Click {
        /// Clicked element.
        id: ElementId,
    },
    /// Pointer entered an element.
    PointerEnter {
        /// Hovered element.
        id: ElementId,
    },
    /// Pointer left an element.
    PointerLeave {
        /// Element left.
        id: ElementId,
    },
}

impl ScriptedEvent {
    /// Expands into the page events a browser would deliver.
    #[must_use]
    pub fn page_events(&self) -> Vec<PageEvent> {
        match self {
            Self::Ready => vec![PageEvent::Ready],
            Self::Load => vec![PageEvent::Load],
            Self::Scroll { scroll_y } => vec![PageEvent::Scroll { scroll_y: *scroll_y }],
            Self::Resize { width, height } => vec![PageEvent::Resize {
                width: *width,
                height: *height,
            }],
            Self::Key { key } => vec![PageEvent::KeyDown(Key::from_dom(key))],
            Self::Swipe { from_y, to_y } => vec![
                PageEvent::TouchStart { screen_y: *from_y },
                PageEvent::TouchEnd { screen_y: *to_y },
            ],
            Self::Click { id } => vec![PageEvent::Click(*id)],
            Self::PointerEnter { id } => vec![PageEvent::PointerEnter(*id)],
            Self::PointerLeave { id } => vec![PageEvent::PointerLeave(*id)],
        }
    }
}

/// A timestamped input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptStep {
    /// When the event arrives (milliseconds since session start).
    pub at_ms: f64,
    /// The input.
    pub event: ScriptedEvent,
}

/// A scripted session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Simulated display refresh interval (milliseconds).
    pub frame_interval_ms: f64,
    /// Inputs, in any order.
    pub steps: Vec<ScriptStep>,
    /// Tear the controller down once everything settled.
    pub teardown: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            frame_interval_ms: 1000.0 / 60.0,
            steps: vec![
                ScriptStep {
                    at_ms: 0.0,
                    event: ScriptedEvent::Ready,
                },
                ScriptStep {
                    at_ms: 0.0,
                    event: ScriptedEvent::Load,
                },
            ],
            teardown: false,
        }
    }
}

impl Script {
    /// Parses a script from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid script or the frame
    /// interval is not positive.
    pub fn from_toml_str(text: &str) -> DeckResult<Self> {
        let script: Self = toml::from_str(text)?;
        if !(script.frame_interval_ms.is_finite() && script.frame_interval_ms > 0.0) {
            return Err(DeckError::InvalidConfig(
                "frame_interval_ms must be a positive number".to_string(),
            ));
        }
        Ok(script)
    }

    /// Loads a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> DeckResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DeckError::io(path, e))?;
        Self::from_toml_str(&text)
    }
}

/// A command and the simulated time it was emitted at.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    /// Emission time (milliseconds).
    pub at_ms: f64,
    /// The command.
    pub command: DomCommand,
}

/// Runs scripts against a controller.
#[derive(Debug)]
pub struct Replay {
    controller: PageController,
    buffer: CommandBuffer,
    log: Vec<Recorded>,
    next_frame_ms: f64,
}

impl Replay {
    /// Wraps a controller.
    #[must_use]
    pub fn new(controller: PageController) -> Self {
        Self {
            controller,
            buffer: CommandBuffer::new(),
            log: Vec::new(),
            next_frame_ms: 0.0,
        }
    }

    /// Returns the controller.
    #[must_use]
    pub fn controller(&self) -> &PageController {
        &self.controller
    }

    /// Runs `script` and returns every emitted command in order.
    pub fn run(mut self, script: &Script) -> Vec<Recorded> {
        let interval = script.frame_interval_ms;
        let mut steps: Vec<&ScriptStep> = script.steps.iter().collect();
        steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

        for step in steps {
            self.frames_until(step.at_ms, interval);
            for event in step.event.page_events() {
                self.controller.handle(event, step.at_ms, &mut self.buffer);
            }
            self.record(step.at_ms);
        }

        let deadline = self.next_frame_ms + MAX_SETTLE_MS;
        while self.controller.has_pending_work() && self.next_frame_ms <= deadline {
            self.frame(interval);
        }
        if self.controller.has_pending_work() {
            tracing::warn!(deadline, "session still busy at settle deadline");
        }

        if script.teardown {
            let released = self.controller.teardown(&mut self.buffer);
            tracing::debug!(subscriptions = released.len(), "replay torn down");
            self.record(self.next_frame_ms);
        }

        tracing::info!(commands = self.log.len(), "replay finished");
        self.log
    }

    fn frames_until(&mut self, until_ms: f64, interval: f64) {
        while self.next_frame_ms <= until_ms {
            self.frame(interval);
        }
    }

    fn frame(&mut self, interval: f64) {
        let now = self.next_frame_ms;
        self.controller.frame(now, &mut self.buffer);
        self.record(now);
        self.next_frame_ms += interval;
    }

    fn record(&mut self, at_ms: f64) {
        self.log
            .extend(self.buffer.drain().map(|command| Recorded { at_ms, command }));
    }
}
