//! Per-element metric counter animation.
//!
//! Each metric display owns one [`MetricAnimation`]. The host ticks it once
//! per display refresh with the current timestamp and writes whatever
//! [`Frame`] comes back. Once the animation completes it only ever returns
//! [`Frame::Idle`], so the host can stop scheduling ticks.
//!
//! ```text
//!   start ──► Running(progress) ──tick──► Running(progress')
//!                    │                            │
//!                    └── cancel ──┐     progress >= 1
//!                                 ▼               ▼
//!                             Completed ◄── write raw text
//! ```

use crate::easing::Easing;
use crate::metric::MetricSpec;

/// Animation lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationState {
    /// Counting up. `progress` is the un-eased fraction of the duration.
    Running {
        /// Linear progress in `[0, 1)`.
        progress: f64,
    },
    /// Raw text has been restored; no further writes.
    Completed,
}

/// What the host should write after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Intermediate formatted value.
    Update(String),
    /// Final frame: the original text, verbatim.
    Finished(String),
    /// Nothing to write; the animation is already complete.
    Idle,
}

impl Frame {
    /// Returns the text to write, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Update(text) | Self::Finished(text) => Some(text),
            Self::Idle => None,
        }
    }
}

/// Counts a metric display up from zero to its parsed magnitude.
#[derive(Debug, Clone)]
pub struct MetricAnimation {
    /// Parsed metric being animated.
    spec: MetricSpec,
    /// Value at progress 0.
    from: f64,
    /// Timestamp of the first frame (milliseconds).
    start_ms: f64,
    /// Total duration (milliseconds).
    duration_ms: f64,
    /// Easing curve.
    easing: Easing,
    /// Lifecycle state.
    state: AnimationState,
}

impl MetricAnimation {
    /// Default counter duration (milliseconds).
    pub const DEFAULT_DURATION_MS: f64 = 2000.0;

    /// Starts an animation from zero at `start_ms`.
    ///
    /// Returns `None` when the metric has no numeric content; the element
    /// then keeps its static text.
    #[must_use]
    pub fn start(spec: MetricSpec, start_ms: f64, duration_ms: f64, easing: Easing) -> Option<Self> {
        if !spec.is_animatable() {
            tracing::debug!(text = spec.raw_text(), "metric has no numeric content, skipping");
            return None;
        }

        Some(Self {
            spec,
            from: 0.0,
            start_ms,
            duration_ms,
            easing,
            state: AnimationState::Running { progress: 0.0 },
        })
    }

    /// Parses `text` and starts an animation with the default duration and curve.
    #[must_use]
    pub fn for_text(text: &str, start_ms: f64) -> Option<Self> {
        Self::start(
            MetricSpec::parse(text),
            start_ms,
            Self::DEFAULT_DURATION_MS,
            Easing::QuarticOut,
        )
    }

    /// Returns the metric being animated.
    #[must_use]
    pub fn spec(&self) -> &MetricSpec {
        &self.spec
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Returns true once the raw text has been restored.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == AnimationState::Completed
    }

    /// Linear progress at `now_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress_at(&self, now_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let progress = (now_ms - self.start_ms) / self.duration_ms;
        if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        }
    }

    /// Interpolated value at linear `progress`.
    #[must_use]
    pub fn value_at(&self, progress: f64) -> f64 {
        let eased = self.easing.apply(progress);
        self.from + (self.spec.magnitude() - self.from) * eased
    }

    /// Advances the animation to `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Frame {
        if self.is_complete() {
            return Frame::Idle;
        }

        let progress = self.progress_at(now_ms);
        if progress < 1.0 {
            self.state = AnimationState::Running { progress };
            return Frame::Update(self.spec.render(self.value_at(progress)));
        }

        self.state = AnimationState::Completed;
        tracing::trace!(text = self.spec.raw_text(), "metric animation complete");
        Frame::Finished(self.spec.raw_text().to_owned())
    }

    /// Stops the animation immediately.
    ///
    /// Returns the raw text to restore if the animation was still running.
    pub fn cancel(&mut self) -> Option<String> {
        if self.is_complete() {
            return None;
        }
        self.state = AnimationState::Completed;
        Some(self.spec.raw_text().to_owned())
    }
}
