//! # Deck
//!
//! The presentation runtime, integrating the metric engine and the page
//! controller.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         DECK RUNTIME                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │   ┌──────────────┐      ┌──────────────┐      ┌───────────┐  │
//! │   │  deck_core   │─────>│   deck_ui    │<─────│ web host  │  │
//! │   │  • parsing   │      │  • controller│      │ (wasm32)  │  │
//! │   │  • easing    │      │  • commands  │      └───────────┘  │
//! │   │  • animation │      │  • events    │<─────┌───────────┐  │
//! │   └──────────────┘      └──────────────┘      │  replay   │  │
//! │                                               └───────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `replay`: scripted headless sessions
//! - `web`: browser host (wasm32 only)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod replay;

#[cfg(target_arch = "wasm32")]
#[allow(unsafe_code)]
pub mod web;

pub use deck_core as core;
pub use deck_ui as ui;

pub use replay::{Recorded, Replay, Script, ScriptStep, ScriptedEvent};
