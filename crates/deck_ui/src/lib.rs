//! # Deck UI
//!
//! Event-driven page controller for the presentation deck:
//! - Scroll-spy highlighting of the navbar
//! - Tab switching, keyboard and swipe section navigation
//! - Scroll-reveal of cards and feature bars
//! - Metric count-up animations driven by frame ticks
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │                    PAGE PIPELINE                        │
//! ├────────────────────────────────────────────────────────┤
//! │  Host Events → PageController → DomCommands → Host DOM │
//! │       ↓              ↓               ↓           ↓     │
//! │  Subscriptions  State Update    CommandBuffer  Apply   │
//! └────────────────────────────────────────────────────────┘
//! ```
//!
//! The controller never touches a document. Hosts translate DOM events into
//! [`PageEvent`]s, call [`PageController::frame`] on every display refresh
//! while there is pending work, and apply the [`DomCommand`]s it emits.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod command;
pub mod config;
pub mod controller;
pub mod hover;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod page;
pub mod reveal;
pub mod schedule;
pub mod style;
pub mod subscription;
pub mod tabs;

pub use command::{CommandBuffer, DomCommand};
pub use config::{HoverConfig, MetricConfig, NavigationConfig, PageConfig, RevealConfig};
pub use controller::PageController;
pub use hover::{HoverEffect, HoverTarget};
pub use input::{EventOutcome, Key, PageEvent, SwipeTracker};
pub use layout::{Rect, Viewport};
pub use navigation::{NavHighlighter, NavLink, Section, Step};
pub use page::{ElementId, MetricDisplay, PageModel};
pub use reveal::{FeatureBar, RevealObserver, RevealTarget};
pub use schedule::{Debouncer, DelayQueue};
pub use subscription::{EventSource, Subscription, SubscriptionId, SubscriptionRegistry};
pub use tabs::{TabButton, TabContent};
