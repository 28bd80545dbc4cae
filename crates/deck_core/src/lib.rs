//! # Deck Core
//!
//! Metric animation engine for the presentation deck:
//! - Parses displayed metric text (`"42%"`, `"$3.2M"`, `"4.5:1"`, `"0.857"`, `"120"`)
//! - Counts each value up from zero with an ease-out curve
//! - Restores the exact original text on the final frame
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    METRIC PIPELINE                        │
//! ├──────────────────────────────────────────────────────────┤
//! │  Raw Text → MetricSpec → MetricAnimation → Frame Text    │
//! │     ↓           ↓              ↓               ↓         │
//! │  Detection  Magnitude     Easing/Tick     Format/Restore │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use deck_core::{Easing, Frame, MetricAnimation, MetricSpec};
//!
//! let spec = MetricSpec::parse("$3.2M");
//! let mut anim = MetricAnimation::start(spec, 0.0, 2000.0, Easing::QuarticOut).unwrap();
//!
//! assert!(matches!(anim.tick(500.0), Frame::Update(_)));
//! assert_eq!(anim.tick(2000.0), Frame::Finished("$3.2M".to_string()));
//! assert_eq!(anim.tick(2016.0), Frame::Idle);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod easing;
pub mod error;
pub mod format;
pub mod metric;

pub use animation::{AnimationState, Frame, MetricAnimation};
pub use easing::Easing;
pub use error::{DeckError, DeckResult};
pub use format::FormatKind;
pub use metric::{parse_float_prefix, MetricSpec};
